mod batch_loader_tests;
mod utils;

mod fields_tests;
mod utils;
mod variables_tests;

mod abstract_type_tests;
mod execution_phase_tests;
mod executor_tests;
mod utils;

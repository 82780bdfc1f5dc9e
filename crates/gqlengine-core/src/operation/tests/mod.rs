mod fragment_table_tests;
mod select_operation_tests;

mod graphql_parser_operation_tests;
mod graphql_parser_selection_tests;
mod graphql_token_stream_tests;
mod printer_tests;
mod utils;

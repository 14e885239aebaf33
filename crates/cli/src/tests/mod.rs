mod alert_tests;
mod parse_tests;

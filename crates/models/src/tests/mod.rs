/// Row validation and CRUD against a live database
pub mod app_user_tests;

mod crud_tests;
mod transaction_tests;

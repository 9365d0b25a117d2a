mod helpers;
mod naive_tests;

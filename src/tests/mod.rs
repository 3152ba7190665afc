mod support;

mod harness_tests;

mod translate_tests;

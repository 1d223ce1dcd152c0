mod smoke_tests;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - smoke_tests: Basic functionality tests to ensure nothing is broken
// - classroom_mock: Mocking the Google Classroom API to exercise the
//   coursework aggregator without network access

mod printer_roundtrip_tests;

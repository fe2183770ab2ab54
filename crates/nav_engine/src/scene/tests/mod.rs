mod navigation_integration;

mod simulation_properties;

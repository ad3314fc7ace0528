quantity!(KilowattHoursPerKilogram, "kWh/kg");
quantity!(KilogramsPerHour, "kg/h");

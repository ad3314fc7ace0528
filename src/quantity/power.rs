use std::ops::Mul;

use crate::quantity::{energy::{KilowattHours, WattHours}, time::Hours};

quantity!(Watts, "W");
quantity!(Kilowatts, "kW");
quantity!(Megawatts, "MW");

impl From<Kilowatts> for Watts {
    fn from(value: Kilowatts) -> Self {
        Self(value.0 * 1_000.0)
    }
}

impl From<Megawatts> for Watts {
    fn from(value: Megawatts) -> Self {
        Self(value.0 * 1_000_000.0)
    }
}

impl From<Megawatts> for Kilowatts {
    fn from(value: Megawatts) -> Self {
        Self(value.0 * 1_000.0)
    }
}

impl Mul<Hours> for Watts {
    type Output = WattHours;

    fn mul(self, rhs: Hours) -> Self::Output {
        WattHours(self.0 * rhs.0)
    }
}

impl Mul<Hours> for Kilowatts {
    type Output = KilowattHours;

    fn mul(self, rhs: Hours) -> Self::Output {
        KilowattHours(self.0 * rhs.0)
    }
}

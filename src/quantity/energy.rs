use std::ops::Div;

use crate::quantity::{
    mass::Kilograms,
    rate::KilowattHoursPerKilogram,
};

quantity!(WattHours, "Wh");
quantity!(KilowattHours, "kWh");
quantity!(MegawattHours, "MWh");
quantity!(GigawattHours, "GWh");

impl From<WattHours> for KilowattHours {
    fn from(value: WattHours) -> Self {
        Self(value.0 * 0.001)
    }
}

impl From<WattHours> for MegawattHours {
    fn from(value: WattHours) -> Self {
        Self(value.0 * 0.000_001)
    }
}

impl From<KilowattHours> for GigawattHours {
    fn from(value: KilowattHours) -> Self {
        Self(value.0 * 0.000_001)
    }
}

/// Ratio of two energies, used for the allocation shares.
impl Div for WattHours {
    type Output = f64;

    fn div(self, rhs: Self) -> Self::Output {
        self.0 / rhs.0
    }
}

impl Div<KilowattHoursPerKilogram> for KilowattHours {
    type Output = Kilograms;

    fn div(self, rhs: KilowattHoursPerKilogram) -> Self::Output {
        Kilograms(self.0 / rhs.0)
    }
}

impl Div<Kilograms> for KilowattHours {
    type Output = KilowattHoursPerKilogram;

    fn div(self, rhs: Kilograms) -> Self::Output {
        KilowattHoursPerKilogram(self.0 / rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_per_heating_value_is_mass() {
        assert_eq!(KilowattHours(78.8) / KilowattHoursPerKilogram(39.4), Kilograms(2.0));
    }

    #[test]
    fn ratio() {
        assert_eq!(WattHours(250.0) / WattHours(1000.0), 0.25);
    }
}

use std::ops::Div;

use crate::quantity::{rate::KilogramsPerHour, time::Hours};

quantity!(Kilograms, "kg");
quantity!(Tonnes, "t");

impl From<Kilograms> for Tonnes {
    fn from(value: Kilograms) -> Self {
        Self(value.0 * 0.001)
    }
}

impl Div<Hours> for Kilograms {
    type Output = KilogramsPerHour;

    fn div(self, rhs: Hours) -> Self::Output {
        KilogramsPerHour(self.0 / rhs.0)
    }
}

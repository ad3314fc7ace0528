use bon::bon;

use crate::{
    core::{error::InvalidParameterError, series::GenerationSeries},
    quantity::{energy::WattHours, power::Watts, time::Hours},
};

/// One-way charge efficiency of the buffer battery.
pub const CHARGING_EFFICIENCY: f64 = 0.995;

/// One-way discharge efficiency of the buffer battery.
pub const DISCHARGING_EFFICIENCY: f64 = 0.995;

#[derive(Copy, Clone, Debug)]
pub struct BatteryParameters {
    /// Maximum charge or discharge power.
    pub power_limit: Watts,

    /// Storage capacity.
    pub capacity: WattHours,

    pub charging_efficiency: f64,
    pub discharging_efficiency: f64,
}

#[bon]
impl BatteryParameters {
    #[builder]
    pub fn new(
        power_limit: Watts,
        capacity: WattHours,
        #[builder(default = CHARGING_EFFICIENCY)] charging_efficiency: f64,
        #[builder(default = DISCHARGING_EFFICIENCY)] discharging_efficiency: f64,
    ) -> Result<Self, InvalidParameterError> {
        if !power_limit.0.is_finite() || power_limit < Watts::ZERO {
            return Err(InvalidParameterError::new(format!(
                "battery power limit must be non-negative, got {power_limit}"
            )));
        }
        if !capacity.0.is_finite() || capacity < WattHours::ZERO {
            return Err(InvalidParameterError::new(format!(
                "battery capacity must be non-negative, got {capacity}"
            )));
        }
        for (name, efficiency) in
            [("charging", charging_efficiency), ("discharging", discharging_efficiency)]
        {
            if !efficiency.is_finite() || efficiency <= 0.0 || efficiency > 1.0 {
                return Err(InvalidParameterError::new(format!(
                    "battery {name} efficiency must be within (0, 1], got {efficiency}"
                )));
            }
        }
        Ok(Self { power_limit, capacity, charging_efficiency, discharging_efficiency })
    }
}

/// Mutable simulation state, advanced hour by hour in timestamp order and
/// discarded after the run.
#[derive(Copy, Clone, Debug)]
pub struct BatteryState {
    /// Energy currently held, always within `[0, capacity]`.
    pub stored: WattHours,

    /// Pre-efficiency energy sent into the battery.
    pub sent: WattHours,

    /// Post-efficiency energy delivered back to the electrolyzer.
    pub consumed: WattHours,

    /// Surplus that neither the electrolyzer nor the battery could take.
    pub curtailed: WattHours,
}

impl BatteryState {
    const EMPTY: Self = Self {
        stored: WattHours::ZERO,
        sent: WattHours::ZERO,
        consumed: WattHours::ZERO,
        curtailed: WattHours::ZERO,
    };

    /// Advance one hour and return the supply towards the electrolyzer: the
    /// generation net of the energy diverted into the battery, plus the energy
    /// the battery delivers back.
    ///
    /// The decision depends only on the current stored energy and this hour's
    /// generation; there is no lookahead or rebalancing of prior hours.
    fn step(
        &mut self,
        generation: WattHours,
        demand_ceiling: WattHours,
        params: &BatteryParameters,
    ) -> WattHours {
        let hourly_limit = params.power_limit * Hours(1.0);
        let surplus = generation - demand_ceiling;
        if surplus > WattHours::ZERO {
            let headroom = params.capacity - self.stored;
            let charge = surplus.min(hourly_limit).min(headroom);
            self.stored += charge * params.charging_efficiency;
            self.sent += charge;
            self.curtailed += surplus - charge;
            generation - charge
        } else {
            let discharge = (-surplus).min(hourly_limit).min(self.stored);
            self.stored -= discharge;
            let delivered = discharge * params.discharging_efficiency;
            self.consumed += delivered;
            generation + delivered
        }
    }
}

/// Result of one battery pass over a generation series.
pub struct BatteryOutcome {
    /// Per-hour renewable supply towards the electrolyzer: generation, minus
    /// the energy diverted into the battery that hour, plus the energy the
    /// battery delivered. Energy cycled through the battery therefore shows up
    /// exactly once, on discharge, and the series sums to the total generation
    /// minus the round-trip losses.
    pub supply: Vec<WattHours>,

    pub sent_to_battery: WattHours,
    pub consumed_from_battery: WattHours,
    pub curtailed: WattHours,
}

impl BatteryOutcome {
    /// Renewable energy destroyed by the charge/discharge round trip.
    pub fn efficiency_losses(&self) -> WattHours {
        self.sent_to_battery - self.consumed_from_battery
    }
}

/// Run the charge/discharge simulation: a single chronological fold over the
/// series, with the electrolyzer capacity as the hourly demand ceiling.
pub fn simulate(
    series: &GenerationSeries,
    capacity: Watts,
    params: &BatteryParameters,
) -> BatteryOutcome {
    let demand_ceiling = capacity * Hours(1.0);
    let mut state = BatteryState::EMPTY;
    let supply = series
        .values()
        .iter()
        .map(|generation| {
            let supply = state.step(*generation, demand_ceiling, params);
            debug_assert!(state.stored >= WattHours::ZERO && state.stored <= params.capacity);
            supply
        })
        .collect();
    BatteryOutcome {
        supply,
        sent_to_battery: state.sent,
        consumed_from_battery: state.consumed,
        curtailed: state.curtailed,
    }
}

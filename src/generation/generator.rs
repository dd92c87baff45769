//! Scenario generator that ties the pipeline stages together
//!
//! One pass draws the time step count, lays out the grid, assigns signals,
//! populates roads, generates cars and places them, always in that order. The
//! order is part of the reproducibility contract: every stage consumes the
//! same RNG handle, so reordering stages changes the output for a given seed.

use log::debug;
use rand::Rng;

use super::car_generator::CarGenerator;
use super::config::GeneratorConfig;
use super::error::Result;
use super::export::ScenarioRecord;
use super::gridder::Gridder;
use super::positioner::Positioner;
use super::road_network::RoadNetwork;
use super::road_populater::RoadPopulater;
use super::signaliser::Signaliser;
use super::time_stepper::TimeStepper;
use super::types::Car;

/// Capability shared by every pipeline strategy
pub trait Strategy {
    /// Drop any state accumulated by earlier passes. Stateless strategies
    /// keep the default.
    fn reset(&mut self) {}
}

/// Output of one completed pass
#[derive(Debug, Clone)]
pub struct Scenario {
    pub time_steps: u64,
    pub network: RoadNetwork,
    pub cars: Vec<Car>,
}

impl Scenario {
    pub fn to_record(&self) -> Result<ScenarioRecord> {
        ScenarioRecord::from_scenario(self)
    }
}

/// The scenario generator
///
/// Idle after construction or [`Generator::reset`], populated after a
/// successful [`Generator::generate`].
pub struct Generator {
    time_stepper: TimeStepper,
    gridder: Gridder,
    signaliser: Signaliser,
    road_populater: RoadPopulater,
    car_generator: CarGenerator,
    positioner: Positioner,

    scenario: Option<Scenario>,
}

impl Generator {
    pub fn new(
        time_stepper: TimeStepper,
        gridder: Gridder,
        signaliser: Signaliser,
        road_populater: RoadPopulater,
        car_generator: CarGenerator,
        positioner: Positioner,
    ) -> Self {
        Self {
            time_stepper,
            gridder,
            signaliser,
            road_populater,
            car_generator,
            positioner,
            scenario: None,
        }
    }

    /// Build every strategy named by `config`
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        Ok(Self::new(
            TimeStepper::from_spec(&config.time_step)?,
            Gridder::from_spec(&config.grid)?,
            Signaliser::from_spec(&config.signal)?,
            RoadPopulater::from_spec(&config.road)?,
            CarGenerator::from_spec(&config.car)?,
            Positioner::from_spec(&config.position)?,
        ))
    }

    /// Run one full pass. A populated generator is reset first; a failed pass
    /// leaves the generator idle.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Scenario> {
        if self.scenario.is_some() {
            self.reset();
        }

        match self.run_pipeline(rng) {
            Ok(scenario) => Ok(&*self.scenario.insert(scenario)),
            Err(err) => {
                self.reset();
                Err(err)
            }
        }
    }

    fn run_pipeline<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Scenario> {
        let time_steps = self.time_stepper.draw(rng)?;
        debug!("Drew {} time steps", time_steps);

        let mut network = self.gridder.generate()?;
        self.signaliser.assign(&mut network, rng)?;
        self.road_populater.populate(&mut network, rng)?;

        let mut cars = self.car_generator.generate(rng);
        debug!("Generated {} cars", cars.len());
        self.positioner.place(&mut cars, &network, rng)?;

        Ok(Scenario {
            time_steps,
            network,
            cars,
        })
    }

    /// Back to idle, clearing the scenario and every strategy's state
    pub fn reset(&mut self) {
        self.scenario = None;

        let strategies: [&mut dyn Strategy; 6] = [
            &mut self.time_stepper,
            &mut self.gridder,
            &mut self.signaliser,
            &mut self.road_populater,
            &mut self.car_generator,
            &mut self.positioner,
        ];
        for strategy in strategies {
            strategy.reset();
        }
    }

    pub fn is_populated(&self) -> bool {
        self.scenario.is_some()
    }

    /// The scenario of the last successful pass
    pub fn scenario(&self) -> Option<&Scenario> {
        self.scenario.as_ref()
    }
}

use chrono::{Local, NaiveDate};
use rand::Rng;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Number of days covered by one forecast, starting tomorrow.
pub const FORECAST_DAYS: usize = 5;

pub const MIN_TEMPERATURE_C: i32 = -20;
pub const MAX_TEMPERATURE_C: i32 = 55;

pub const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

/// One day of synthetic weather.
///
/// The Fahrenheit temperature is not stored, it is derived from the Celsius
/// value whenever it is read or serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherForecast {
    date: NaiveDate,
    temperature_c: i32,
    summary: &'static str,
}

// The binary only serializes records, the accessors serve the tests.
#[cfg_attr(not(test), allow(dead_code))]
impl WeatherForecast {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn temperature_c(&self) -> i32 {
        self.temperature_c
    }

    pub fn temperature_f(&self) -> i32 {
        // Truncates toward zero.
        32 + (f64::from(self.temperature_c) / 0.5556) as i32
    }

    pub fn summary(&self) -> &'static str {
        self.summary
    }
}

impl Serialize for WeatherForecast {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("WeatherForecast", 4)?;
        state.serialize_field("date", &self.date)?;
        state.serialize_field("temperatureC", &self.temperature_c)?;
        state.serialize_field("temperatureF", &self.temperature_f())?;
        state.serialize_field("summary", self.summary)?;
        state.end()
    }
}

/// Generates the forecast for the days following `today`.
///
/// Both the date and the random source are passed in so a caller can pin
/// them down, the handler uses the local clock and the thread rng.
pub fn forecast<R>(today: NaiveDate, rng: &mut R) -> Vec<WeatherForecast>
where
    R: Rng,
{
    today
        .iter_days()
        .skip(1)
        .take(FORECAST_DAYS)
        .map(|date| WeatherForecast {
            date,
            temperature_c: rng.random_range(MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C),
            summary: SUMMARIES[rng.random_range(0..SUMMARIES.len())],
        })
        .collect()
}

/// Where the handlers get "today" from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    Local,
    #[cfg_attr(not(test), allow(dead_code))]
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::Local => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

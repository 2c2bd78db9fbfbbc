//! Mock weather lookup

use std::time::Duration;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::debug;

/// Color for messages that are not tied to a city
pub const NEUTRAL_COLOR: &str = "#ffffff";
/// Color for the "city not found" message
pub const NOT_FOUND_COLOR: &str = "#FF6347";

pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city name.";
pub const NOT_FOUND_MESSAGE: &str = "City not found in mock data.";

/// Latency of the simulated current-weather fetch
pub const FETCH_DELAY: Duration = Duration::from_secs(1);

/// One entry of the mock data set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityWeather {
    pub city: &'static str,
    pub temperature: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}

const MOCK_CITIES: &[CityWeather] = &[
    CityWeather { city: "London", temperature: "15°C", description: "Cloudy", color: "#87CEEB" },
    CityWeather { city: "New York", temperature: "20°C", description: "Sunny", color: "#FFD700" },
    CityWeather { city: "Paris", temperature: "18°C", description: "Rainy", color: "#ADD8E6" },
    CityWeather { city: "Tokyo", temperature: "22°C", description: "Clear", color: "#FFA07A" },
];

/// Message and color to show for a lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub message: String,
    pub color: String,
    pub found: bool,
}

impl WeatherReport {
    fn miss(message: &str, color: &str) -> Self {
        Self {
            message: message.to_string(),
            color: color.to_string(),
            found: false,
        }
    }
}

/// Current conditions returned by the simulated fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: String,
    pub description: String,
}

/// Look a city up in the mock data. Names are matched exactly after
/// trimming surrounding whitespace.
pub fn lookup(city: &str) -> WeatherReport {
    let city = city.trim();
    if city.is_empty() {
        return WeatherReport::miss(EMPTY_CITY_MESSAGE, NEUTRAL_COLOR);
    }

    match MOCK_CITIES.iter().find(|entry| entry.city == city) {
        Some(entry) => {
            debug!("Weather lookup hit for {}", city);
            WeatherReport {
                message: format!(
                    "Temperature: {}, Description: {}",
                    entry.temperature, entry.description
                ),
                color: entry.color.to_string(),
                found: true,
            }
        }
        None => {
            debug!("Weather lookup miss for {}", city);
            WeatherReport::miss(NOT_FOUND_MESSAGE, NOT_FOUND_COLOR)
        }
    }
}

/// Simulate fetching the current weather from a remote API
pub async fn fetch_current(delay: Duration) -> CurrentWeather {
    sleep(delay).await;
    CurrentWeather {
        temperature: "22°C".to_string(),
        description: "Sunny".to_string(),
    }
}

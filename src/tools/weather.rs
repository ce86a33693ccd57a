//! Weather tool
//!
//! Queries the public wttr.in endpoint (no API key required) and formats the
//! first current-condition record into a short report.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use super::tool::{Tool, ToolResult};

/// Request timeout in seconds
const TIMEOUT_SECS: u64 = 5;
/// Public weather endpoint
const WTTR_BASE_URL: &str = "https://wttr.in";

/// wttr.in `format=j1` response (only the fields we use)
#[derive(Debug, Deserialize)]
struct WttrResponse {
    current_condition: Vec<CurrentCondition>,
}

#[derive(Debug, Deserialize)]
struct CurrentCondition {
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "weatherDesc")]
    weather_desc: Vec<WeatherDesc>,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: String,
    humidity: String,
}

#[derive(Debug, Deserialize)]
struct WeatherDesc {
    value: String,
}

/// Weather lookup tool
pub struct WeatherTool {
    client: reqwest::Client,
    base_url: String,
}

impl WeatherTool {
    /// Create a new weather tool
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: WTTR_BASE_URL.to_string(),
        })
    }

    async fn get_weather(&self, city: &str) -> ToolResult {
        tracing::info!("[WEATHER] Consultando clima: {}", city);

        let url = format!("{}/{}?format=j1", self.base_url, city);
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("[WEATHER] Erro: {}", e);
                return ToolResult::error(format!("Erro ao consultar clima: {}", e));
            }
        };

        if !response.status().is_success() {
            tracing::warn!("[WEATHER] HTTP {} para {}", response.status(), city);
            return ToolResult::error(format!("Não consegui obter o clima para {}", city));
        }

        let data: WttrResponse = match response.json().await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("[WEATHER] Erro: {}", e);
                return ToolResult::error(format!("Erro ao consultar clima: {}", e));
            }
        };

        let Some(current) = data.current_condition.first() else {
            return ToolResult::error(format!("Não consegui obter o clima para {}", city));
        };

        tracing::info!("[WEATHER] Sucesso: {}", city);
        ToolResult::success(format_report(city, current))
    }
}

/// Format a current-condition record into the user-facing report
fn format_report(city: &str, current: &CurrentCondition) -> String {
    let condition = current
        .weather_desc
        .first()
        .map(|d| d.value.as_str())
        .unwrap_or("desconhecida");

    format!(
        "Clima em {}:\n\
         🌡️ Temperatura: {}°C\n\
         ☁️ Condição: {}\n\
         💨 Vento: {} km/h\n\
         💧 Umidade: {}%",
        city, current.temp_c, condition, current.windspeed_kmph, current.humidity
    )
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "Weather"
    }

    fn description(&self) -> &str {
        "Útil para consultar o clima atual de uma cidade. Input: nome da cidade como string"
    }

    async fn call(&self, input: &str) -> ToolResult {
        self.get_weather(input.trim()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_report() {
        let current = CurrentCondition {
            temp_c: "22".to_string(),
            weather_desc: vec![WeatherDesc {
                value: "Partly cloudy".to_string(),
            }],
            windspeed_kmph: "13".to_string(),
            humidity: "65".to_string(),
        };

        let report = format_report("São Paulo", &current);
        assert!(report.starts_with("Clima em São Paulo:"));
        assert!(report.contains("Temperatura: 22°C"));
        assert!(report.contains("Condição: Partly cloudy"));
        assert!(report.contains("Vento: 13 km/h"));
        assert!(report.contains("Umidade: 65%"));
    }

    #[test]
    fn test_parse_wttr_response() {
        let json = r#"{
            "current_condition": [{
                "temp_C": "18",
                "weatherDesc": [{"value": "Sunny"}],
                "windspeedKmph": "9",
                "humidity": "40"
            }]
        }"#;

        let data: WttrResponse = serde_json::from_str(json).unwrap();
        assert_eq!(data.current_condition[0].temp_c, "18");
        assert_eq!(data.current_condition[0].weather_desc[0].value, "Sunny");
    }
}

//! Cryptocurrency price tool
//!
//! Resolves common ticker symbols to CoinGecko ids and fetches the USD/BRL
//! spot price plus the 24-hour change.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use super::tool::{Tool, ToolResult};

/// Request timeout in seconds
const TIMEOUT_SECS: u64 = 5;
/// CoinGecko API base URL
const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Common ticker aliases; anything else is passed through lowercased
const SYMBOL_ALIASES: &[(&str, &str)] = &[
    ("btc", "bitcoin"),
    ("eth", "ethereum"),
    ("usdt", "tether"),
    ("bnb", "binancecoin"),
    ("sol", "solana"),
    ("ada", "cardano"),
    ("xrp", "ripple"),
];

/// Resolve a user-supplied symbol or name to a CoinGecko id
///
/// Resolution is idempotent: aliases map to the canonical id, and canonical
/// ids map to themselves.
pub fn resolve_id(symbol: &str) -> String {
    let lower = symbol.trim().to_lowercase();
    SYMBOL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map(|(_, id)| id.to_string())
        .unwrap_or(lower)
}

/// Per-currency quote from `/simple/price`
#[derive(Debug, Deserialize)]
struct Quote {
    usd: f64,
    brl: f64,
    #[serde(default)]
    usd_24h_change: Option<f64>,
}

/// Cryptocurrency price tool
pub struct CryptoTool {
    client: reqwest::Client,
    base_url: String,
}

impl CryptoTool {
    /// Create a new crypto price tool
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: COINGECKO_BASE_URL.to_string(),
        })
    }

    async fn get_price(&self, crypto: &str) -> ToolResult {
        tracing::info!("[CRYPTO] Consultando preço: {}", crypto);

        let crypto_id = resolve_id(crypto);
        let url = format!("{}/simple/price", self.base_url);
        let response = match self
            .client
            .get(&url)
            .query(&[
                ("ids", crypto_id.as_str()),
                ("vs_currencies", "usd,brl"),
                ("include_24hr_change", "true"),
            ])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("[CRYPTO] Erro: {}", e);
                return ToolResult::error(format!("Erro ao consultar criptomoeda: {}", e));
            }
        };

        if !response.status().is_success() {
            tracing::warn!("[CRYPTO] HTTP {} para {}", response.status(), crypto_id);
            return ToolResult::error(format!("Erro ao consultar preço de {}", crypto));
        }

        let data: HashMap<String, Quote> = match response.json().await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("[CRYPTO] Erro: {}", e);
                return ToolResult::error(format!("Erro ao consultar criptomoeda: {}", e));
            }
        };

        let Some(quote) = data.get(&crypto_id) else {
            tracing::warn!("[CRYPTO] Id não encontrado: {}", crypto_id);
            return ToolResult::error(format!("Criptomoeda '{}' não encontrada", crypto));
        };

        tracing::info!("[CRYPTO] Sucesso: {}", crypto);
        ToolResult::success(format_quote(crypto, quote))
    }
}

/// Format a quote into the user-facing message
fn format_quote(crypto: &str, quote: &Quote) -> String {
    let change = quote.usd_24h_change.unwrap_or(0.0);
    let indicator = if change > 0.0 { "📈" } else { "📉" };

    format!(
        "💰 {} - Preço Atual:\n\
         🇺🇸 USD: ${}\n\
         🇧🇷 BRL: R$ {}\n\
         {} Variação 24h: {:.2}%",
        crypto.to_uppercase(),
        format_amount(quote.usd),
        format_amount(quote.brl),
        indicator,
        change
    )
}

/// Format an amount with two decimals and thousands separators
fn format_amount(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

#[async_trait]
impl Tool for CryptoTool {
    fn name(&self) -> &str {
        "CryptoPrice"
    }

    fn description(&self) -> &str {
        "Útil para consultar preço de criptomoedas. Input: nome ou símbolo da criptomoeda (ex: 'bitcoin', 'btc', 'ethereum')"
    }

    async fn call(&self, input: &str) -> ToolResult {
        self.get_price(input.trim()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_resolution_is_idempotent() {
        assert_eq!(resolve_id("btc"), "bitcoin");
        assert_eq!(resolve_id("bitcoin"), "bitcoin");
        assert_eq!(resolve_id("eth"), "ethereum");
        assert_eq!(resolve_id("ethereum"), "ethereum");
        assert_eq!(resolve_id("ETH"), "ethereum");
        assert_eq!(resolve_id(" sol "), "solana");
    }

    #[test]
    fn test_unknown_symbol_passes_through_lowercased() {
        assert_eq!(resolve_id("Dogecoin"), "dogecoin");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(68412.5), "68,412.50");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(0.42), "0.42");
        assert_eq!(format_amount(999.0), "999.00");
    }

    #[test]
    fn test_format_quote_direction() {
        let up = Quote {
            usd: 100.0,
            brl: 500.0,
            usd_24h_change: Some(2.5),
        };
        let message = format_quote("btc", &up);
        assert!(message.contains("💰 BTC - Preço Atual:"));
        assert!(message.contains("📈 Variação 24h: 2.50%"));

        let down = Quote {
            usd: 100.0,
            brl: 500.0,
            usd_24h_change: Some(-1.2),
        };
        assert!(format_quote("btc", &down).contains("📉 Variação 24h: -1.20%"));
    }
}

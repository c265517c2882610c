//! Client for the CurrencyFreaks latest-rates endpoint.

use std::collections::HashMap;
use std::future::Future;

use log::{debug, error};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{BotError, Result};
use crate::types::CurrencyCode;

pub const DEFAULT_RATES_API_URL: &str = "https://api.currencyfreaks.com/v2.0/rates/latest";

/// Rates for the requested codes, valid only for the lookup that fetched them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateSnapshot {
    rates: HashMap<CurrencyCode, f64>,
}

impl RateSnapshot {
    pub fn get(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(CurrencyCode, f64)> for RateSnapshot {
    fn from_iter<I: IntoIterator<Item = (CurrencyCode, f64)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}

/// Anything that can quote current rates for a set of currency codes.
pub trait RateSource {
    fn latest(&self, codes: &[CurrencyCode]) -> impl Future<Output = Result<RateSnapshot>> + Send;
}

// CurrencyFreaks sends rates as strings, other services as numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RateValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, RateValue>,
}

/// Turn a rate service response into a snapshot.
///
/// # Errors
///
/// Returns [`BotError::RateFetch`] for any non-200 status, a body that is not
/// JSON with a `rates` object, or a rate that is not a number.
pub fn parse_rates(status: StatusCode, body: &str) -> Result<RateSnapshot> {
    if status != StatusCode::OK {
        return Err(BotError::RateFetch {
            status,
            message: body.chars().take(200).collect(),
        });
    }

    let response: RatesResponse =
        serde_json::from_str(body).map_err(|e| BotError::RateFetch {
            status,
            message: format!("Malformed rates body: {e}"),
        })?;

    response
        .rates
        .into_iter()
        .map(|(code, value)| -> Result<(CurrencyCode, f64)> {
            let rate = match value {
                RateValue::Number(rate) => rate,
                RateValue::Text(text) => {
                    text.trim().parse().map_err(|_| BotError::RateFetch {
                        status,
                        message: format!("Rate for {code} is not a number: {text:?}"),
                    })?
                }
            };
            Ok((CurrencyCode::new_unchecked(&code), rate))
        })
        .collect()
}

pub struct RateClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RateClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// The GET request for exactly `codes`, authenticated with the API key.
    pub fn request(&self, codes: &[CurrencyCode]) -> reqwest::Result<reqwest::Request> {
        let symbols = codes
            .iter()
            .map(CurrencyCode::as_str)
            .collect::<Vec<_>>()
            .join(",");

        self.client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("symbols", symbols.as_str())])
            .build()
    }
}

impl RateSource for RateClient {
    async fn latest(&self, codes: &[CurrencyCode]) -> Result<RateSnapshot> {
        if codes.is_empty() {
            return Ok(RateSnapshot::default());
        }
        debug!("Requesting rates for {} symbols", codes.len());

        // The URL carries the API key, so it is stripped from every error.
        let request = self
            .request(codes)
            .map_err(|e| BotError::RateUnavailable(e.without_url()))?;
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| BotError::RateUnavailable(e.without_url()))
            .inspect_err(|e| error!("Failed to reach rate service: {e}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("Failed to read rates response: {e}"));

        let snapshot = parse_rates(status, &body).inspect_err(|e| {
            error!("Failed to retrieve exchange rates: {e}");
        })?;

        debug!("Received {} rates", snapshot.len());
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(code: &str) -> CurrencyCode {
        CurrencyCode::new_unchecked(code)
    }

    #[test]
    fn parses_numeric_rates() -> std::result::Result<(), &'static str> {
        let snapshot = parse_rates(StatusCode::OK, r#"{"rates":{"USD":1.0,"EUR":0.9}}"#)
            .map_err(|_| "expected rates")?;
        assert_eq!(snapshot.get(&code("USD")), Some(1.0));
        assert_eq!(snapshot.get(&code("EUR")), Some(0.9));
        Ok(())
    }

    #[test]
    fn parses_string_rates_and_ignores_other_fields() -> std::result::Result<(), &'static str> {
        let body = r#"{"date":"2024-01-01 00:00:00+00","base":"USD","rates":{"GBP":"0.79","JPY":"148.2"}}"#;
        let snapshot = parse_rates(StatusCode::OK, body).map_err(|_| "expected rates")?;
        assert_eq!(snapshot.get(&code("GBP")), Some(0.79));
        assert_eq!(snapshot.get(&code("JPY")), Some(148.2));
        Ok(())
    }

    #[test]
    fn server_error_carries_status() {
        let err = parse_rates(StatusCode::INTERNAL_SERVER_ERROR, "oops");
        assert!(matches!(
            err,
            Err(BotError::RateFetch {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                ..
            })
        ));
    }

    #[test]
    fn missing_rates_field_is_fetch_error() {
        let err = parse_rates(StatusCode::OK, r#"{"success":false}"#);
        assert!(matches!(err, Err(BotError::RateFetch { .. })));
    }

    #[test]
    fn non_numeric_rate_is_fetch_error() {
        let err = parse_rates(StatusCode::OK, r#"{"rates":{"EUR":"n/a"}}"#);
        assert!(matches!(err, Err(BotError::RateFetch { .. })));
    }

    #[test]
    fn non_ok_success_status_is_rejected() {
        let err = parse_rates(StatusCode::NO_CONTENT, r#"{"rates":{}}"#);
        assert!(matches!(err, Err(BotError::RateFetch { .. })));
    }

    fn query(request: &reqwest::Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn client() -> RateClient {
        RateClient::new(
            "https://rates.example/v2.0/rates/latest".to_string(),
            "secret".to_string(),
        )
    }

    #[test]
    fn request_asks_for_exactly_the_symbols() -> std::result::Result<(), &'static str> {
        let request = client()
            .request(&[code("USD"), code("EUR")])
            .map_err(|_| "expected request")?;
        assert_eq!(*request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/v2.0/rates/latest");
        assert_eq!(
            query(&request),
            vec![
                ("apikey".to_string(), "secret".to_string()),
                ("symbols".to_string(), "USD,EUR".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn same_currency_pair_requests_one_symbol() -> std::result::Result<(), &'static str> {
        let pair = crate::types::CurrencyPair::parse("usd/usd").map_err(|_| "expected pair")?;
        let request = client()
            .request(&pair.symbols())
            .map_err(|_| "expected request")?;
        let symbols: Vec<String> = query(&request)
            .into_iter()
            .filter(|(k, _)| k == "symbols")
            .map(|(_, v)| v)
            .collect();
        assert_eq!(symbols, vec!["USD".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_service_reads_like_fetch_failure() {
        // Nothing listens on the discard port.
        let client = RateClient::new("http://127.0.0.1:9/latest".to_string(), "secret".to_string());
        let err = client.latest(&[code("USD")]).await;
        assert!(matches!(&err, Err(BotError::RateUnavailable(_))));
        if let Err(e) = err {
            assert_eq!(e.user_message(), "Ошибка при получении данных о курсах валют.");
            assert!(!e.to_string().contains("secret"));
        }
    }

    #[tokio::test]
    async fn empty_request_skips_network() -> std::result::Result<(), &'static str> {
        let client = RateClient::new("http://127.0.0.1:9".to_string(), "key".to_string());
        let snapshot = client.latest(&[]).await.map_err(|_| "expected empty")?;
        assert!(snapshot.is_empty());
        Ok(())
    }
}

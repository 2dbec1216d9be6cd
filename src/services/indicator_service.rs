use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

const CACHE_TTL: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub codigo: String,
    pub nombre: String,
    pub unidad_medida: String,
    pub fecha: String,
    pub valor: f64,
}

/// Latest CLP values of the dollar, the euro and the UF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicIndicators {
    pub dolar: Indicator,
    pub euro: Indicator,
    pub uf: Indicator,
}

impl EconomicIndicators {
    /// Salary expressed in CLP, when the currency is one we have a rate for.
    pub fn convert_to_clp(&self, amount: i64, currency: &str) -> Option<i64> {
        let rate = match currency.to_ascii_uppercase().as_str() {
            "CLP" => return Some(amount),
            "USD" => self.dolar.valor,
            "EUR" => self.euro.valor,
            "UF" => self.uf.valor,
            _ => return None,
        };
        Some((amount as f64 * rate).round() as i64)
    }
}

#[derive(Clone)]
pub struct IndicatorService {
    client: Client,
    url: String,
    cache: Arc<RwLock<Option<(Instant, EconomicIndicators)>>>,
}

impl IndicatorService {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to default indicator client");
                Client::new()
            });
        Self {
            client,
            url: url.into(),
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Current indicators, or `None` when the source is unavailable.
    /// Successful lookups are reused for ten minutes.
    pub async fn latest(&self) -> Option<EconomicIndicators> {
        if let Some((fetched_at, cached)) = self.cache.read().await.as_ref() {
            if fetched_at.elapsed() < CACHE_TTL {
                return Some(cached.clone());
            }
        }

        match self.fetch().await {
            Ok(indicators) => {
                *self.cache.write().await = Some((Instant::now(), indicators.clone()));
                Some(indicators)
            }
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "economic indicators unavailable");
                None
            }
        }
    }

    async fn fetch(&self) -> reqwest::Result<EconomicIndicators> {
        self.client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<EconomicIndicators>()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator(codigo: &str, valor: f64) -> Indicator {
        Indicator {
            codigo: codigo.into(),
            nombre: codigo.to_uppercase(),
            unidad_medida: "Pesos".into(),
            fecha: "2025-03-01T03:00:00.000Z".into(),
            valor,
        }
    }

    #[test]
    fn converts_known_currencies() {
        let rates = EconomicIndicators {
            dolar: indicator("dolar", 950.5),
            euro: indicator("euro", 1020.0),
            uf: indicator("uf", 38_500.0),
        };
        assert_eq!(rates.convert_to_clp(900_000, "CLP"), Some(900_000));
        assert_eq!(rates.convert_to_clp(2_000, "usd"), Some(1_901_000));
        assert_eq!(rates.convert_to_clp(30, "UF"), Some(1_155_000));
        assert_eq!(rates.convert_to_clp(10, "BTC"), None);
    }

    #[test]
    fn decodes_source_payload_ignoring_extra_fields() {
        let raw = r#"{
            "version": "1.7.0",
            "autor": "mindicador.cl",
            "fecha": "2025-03-01T03:00:00.000Z",
            "uf": {"codigo": "uf", "nombre": "Unidad de fomento (UF)", "unidad_medida": "Pesos", "fecha": "2025-03-01T03:00:00.000Z", "valor": 38500.12},
            "dolar": {"codigo": "dolar", "nombre": "Dólar observado", "unidad_medida": "Pesos", "fecha": "2025-03-01T03:00:00.000Z", "valor": 950.5},
            "euro": {"codigo": "euro", "nombre": "Euro", "unidad_medida": "Pesos", "fecha": "2025-03-01T03:00:00.000Z", "valor": 1020.3}
        }"#;
        let parsed: EconomicIndicators = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.dolar.valor, 950.5);
        assert_eq!(parsed.uf.codigo, "uf");
    }

    #[tokio::test]
    async fn unreachable_source_degrades_to_none() {
        let service = IndicatorService::new("http://127.0.0.1:9", Duration::from_millis(500));
        assert!(service.latest().await.is_none());
    }
}

//! Best-effort country lookup, used to prefill the registration form.
//!
//! Any failure (network, a non-2xx status, a malformed body) yields
//! the fixed fallback. Registration never blocks on this.

const LOOKUP_URL: &str = "https://ipapi.co/json/";

/// Country used when the lookup fails or answers without one.
pub const FALLBACK_COUNTRY: &str = "Brasil";

/// Looks up the caller's country by IP.
pub async fn lookup_country(http: &reqwest::Client) -> String {
    match fetch_country(http).await {
        Some(country) => country,
        None => {
            tracing::debug!("country lookup failed, using fallback");
            FALLBACK_COUNTRY.to_string()
        }
    }
}

async fn fetch_country(http: &reqwest::Client) -> Option<String> {
    let response = http.get(LOOKUP_URL).send().await.ok()?;
    let json: serde_json::Value = response.json().await.ok()?;
    country_from_json(&json)
}

fn country_from_json(json: &serde_json::Value) -> Option<String> {
    let country = json.get("country_name")?.as_str()?;
    if country.is_empty() {
        return None;
    }
    Some(country.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_name_is_extracted() {
        let json = serde_json::json!({ "ip": "1.2.3.4", "country_name": "Portugal" });
        assert_eq!(country_from_json(&json).as_deref(), Some("Portugal"));
    }

    #[test]
    fn test_missing_or_empty_country_yields_none() {
        assert_eq!(country_from_json(&serde_json::json!({})), None);
        assert_eq!(
            country_from_json(&serde_json::json!({ "country_name": "" })),
            None
        );
        assert_eq!(
            country_from_json(&serde_json::json!({ "country_name": 7 })),
            None
        );
    }
}

use axum::{Json, Router, extract::State, routing::get};

use crate::app::AppState;
use crate::weather::{WeatherForecast, forecast};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_weather_forecast))
        .with_state(state)
}

async fn get_weather_forecast(State(state): State<AppState>) -> Json<Vec<WeatherForecast>> {
    let today = state.clock.today();
    let forecasts = forecast(today, &mut rand::rng());
    log::trace!("generated {} forecasts after {}", forecasts.len(), today);
    Json(forecasts)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::weather::{Clock, MAX_TEMPERATURE_C, MIN_TEMPERATURE_C, SUMMARIES};
    use axum::{
        body::Body,
        http::{self, Request, StatusCode},
    };
    use chrono::NaiveDate;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get_forecast(clock: Clock) -> (StatusCode, Option<String>, Value) {
        let app = routes(AppState { clock });
        let response = app
            .oneshot(
                Request::builder()
                    .method(http::Method::GET)
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .map(|value| value.to_str().unwrap().to_string());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, content_type, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_get_weather_forecast() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let (status, content_type, body) = get_forecast(Clock::Fixed(today)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some(mime::APPLICATION_JSON.as_ref()));

        let records = body.as_array().expect("body should be a json array");
        let dates: Vec<&str> = records
            .iter()
            .map(|record| record["date"].as_str().unwrap())
            .collect();
        assert_eq!(
            dates,
            vec![
                "2024-01-02",
                "2024-01-03",
                "2024-01-04",
                "2024-01-05",
                "2024-01-06"
            ]
        );

        for record in records {
            let temperature_c = record["temperatureC"].as_i64().unwrap();
            assert!(
                (i64::from(MIN_TEMPERATURE_C)..=i64::from(MAX_TEMPERATURE_C))
                    .contains(&temperature_c)
            );
            let temperature_f = record["temperatureF"].as_i64().unwrap();
            assert_eq!(temperature_f, 32 + (temperature_c as f64 / 0.5556) as i64);
            assert!(SUMMARIES.contains(&record["summary"].as_str().unwrap()));
            assert_eq!(record.as_object().unwrap().len(), 4);
        }
    }

    #[tokio::test]
    async fn local_clock_forecast_starts_tomorrow() {
        let before = chrono::Local::now().date_naive();
        let (status, _, body) = get_forecast(Clock::Local).await;
        let after = chrono::Local::now().date_naive();

        assert_eq!(status, StatusCode::OK);
        let first: NaiveDate =
            serde_json::from_value(body[0]["date"].clone()).expect("date should be ISO-8601");
        assert!(first == before.succ_opt().unwrap() || first == after.succ_opt().unwrap());
    }
}

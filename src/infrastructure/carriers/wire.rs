//! # Rating API Wire Format
//!
//! JSON documents exchanged with the rating API.
//!
//! Request: `origin`, `destination`, `packages`, `shipment {carrier, type}`
//! and `settings {currency}`.
//!
//! Response: `{"meta": "rate", "data": [...]}` on success or
//! `{"meta": "error", "error": {"code", "message", "description"}}`.

use crate::domain::entities::{CarrierRateRequest, OriginAddress};
use crate::domain::value_objects::{CarrierId, ShipmentType};
use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
use crate::infrastructure::carriers::http_client::{RawResponse, map_status_error};
use crate::infrastructure::carriers::traits::{RateLine, RawCarrierResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Address block of a rate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    district: Option<String>,
    city: String,
    state: String,
    country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<String>,
}

impl AddressBody {
    fn origin(origin: &OriginAddress, country: &str) -> Self {
        Self {
            name: Some(origin.name.clone()),
            company: Some(origin.company.clone()),
            email: Some(origin.email.clone()),
            phone: Some(origin.phone.clone()),
            street: Some(origin.street.clone()),
            number: Some(origin.number.clone()),
            district: Some(origin.district.clone()),
            city: origin.city_code.to_string(),
            state: origin.state_code.clone(),
            country: country.to_string(),
            postal_code: Some(origin.postal_code.clone()),
        }
    }
}

/// Package dimensions block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DimensionsBody {
    length: u32,
    width: u32,
    height: u32,
}

/// Package block of a rate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageBody {
    content: String,
    amount: u32,
    #[serde(rename = "type")]
    kind: String,
    #[serde(with = "rust_decimal::serde::float")]
    weight: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    declared_value: Decimal,
    weight_unit: String,
    length_unit: String,
    dimensions: DimensionsBody,
}

/// Carrier and shipment type stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShipmentBody {
    carrier: String,
    #[serde(rename = "type")]
    shipment_type: u8,
}

/// Request settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsBody {
    currency: String,
}

/// Full rate request document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateRequestBody {
    origin: AddressBody,
    destination: AddressBody,
    packages: Vec<PackageBody>,
    shipment: ShipmentBody,
    settings: SettingsBody,
}

impl RateRequestBody {
    /// Builds the document for one stamped request.
    #[must_use]
    pub fn from_request(request: &CarrierRateRequest, country: &str, currency: &str) -> Self {
        let template = request.template();
        let destination = template.destination();
        let package = template.package();

        Self {
            origin: AddressBody::origin(template.origin(), country),
            destination: AddressBody {
                name: None,
                company: None,
                email: None,
                phone: None,
                street: None,
                number: None,
                district: None,
                city: destination.city_code.to_string(),
                state: destination.state_code.clone(),
                country: country.to_string(),
                postal_code: destination.postal_code.clone(),
            },
            packages: vec![PackageBody {
                content: "productos".to_string(),
                amount: 1,
                kind: "box".to_string(),
                weight: package.weight_kg,
                declared_value: package.declared_value,
                weight_unit: "KG".to_string(),
                length_unit: "CM".to_string(),
                dimensions: DimensionsBody {
                    length: package.dimensions.length,
                    width: package.dimensions.width,
                    height: package.dimensions.height,
                },
            }],
            shipment: ShipmentBody {
                carrier: request.carrier().to_string(),
                shipment_type: request.shipment_type().code(),
            },
            settings: SettingsBody {
                currency: currency.to_string(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct RateEnvelope {
    #[serde(default)]
    meta: Option<String>,
    #[serde(default)]
    data: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RateLineBody {
    #[serde(default)]
    carrier: Option<String>,
    service: String,
    #[serde(default)]
    service_description: Option<String>,
    #[serde(default)]
    delivery_estimate: Option<String>,
    total_price: Decimal,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    delivery_date: Option<DeliveryDateBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeliveryDateBody {
    #[serde(default)]
    date_difference: Option<u32>,
}

impl ErrorBody {
    fn into_error(self) -> CarrierError {
        let code = self.code.map(|c| match c {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });
        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .or(self.description)
            .unwrap_or_else(|| "carrier reported an error".to_string());
        CarrierError::rejected(message, code)
    }
}

/// Parses a rating API response into lines or a typed failure.
///
/// # Errors
///
/// - `CarrierError::Rejected` for an error envelope, with the carrier message
/// - `CarrierError::Protocol` for bodies that are not a rate envelope
/// - status-derived errors for non-success responses without an envelope
pub fn parse_rate_response(
    response: &RawResponse,
    carrier: &CarrierId,
    shipment_type: ShipmentType,
    default_currency: &str,
) -> CarrierResult<RawCarrierResponse> {
    let envelope: RateEnvelope = match serde_json::from_str(&response.body) {
        Ok(envelope) => envelope,
        Err(_) if !response.status.is_success() => {
            return Err(map_status_error(response.status, &response.body));
        }
        Err(e) => {
            return Err(CarrierError::protocol(format!(
                "Failed to parse response: {}",
                e
            )));
        }
    };

    let is_error_meta = envelope.meta.as_deref() == Some("error");
    if let Some(error) = envelope.error {
        return Err(error.into_error());
    }
    if is_error_meta {
        return Err(CarrierError::rejected("carrier reported an error", None));
    }
    if !response.status.is_success() {
        return Err(map_status_error(response.status, &response.body));
    }

    let data = envelope
        .data
        .ok_or_else(|| CarrierError::protocol("Response has no rate data"))?;

    // A malformed line is dropped on its own; the carrier's other lines stand.
    let lines = data
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<RateLineBody>(value) {
            Ok(line) => Some(line),
            Err(e) => {
                tracing::warn!(
                    carrier = %carrier,
                    shipment_type = shipment_type.code(),
                    error = %e,
                    "skipping malformed rate line"
                );
                None
            }
        })
        .map(|line| RateLine {
            carrier: line
                .carrier
                .as_deref()
                .map(CarrierId::new)
                .unwrap_or_else(|| carrier.clone()),
            service: line.service,
            service_description: line.service_description,
            total_price: line.total_price,
            currency: line
                .currency
                .unwrap_or_else(|| default_currency.to_string()),
            delivery_estimate: line.delivery_estimate,
            estimated_days: line.delivery_date.and_then(|d| d.date_difference),
        })
        .collect();

    Ok(RawCarrierResponse::new(carrier.clone(), shipment_type, lines))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        DestinationSpec, Dimensions, PackageSpec, RateRequestTemplate,
    };
    use crate::domain::value_objects::DivisionCode;
    use reqwest::StatusCode;
    use serde_json::json;

    fn raw(status: StatusCode, body: serde_json::Value) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }

    fn carrier() -> CarrierId {
        CarrierId::new("coordinadora")
    }

    #[test]
    fn request_body_shape() {
        let template = RateRequestTemplate::new(
            OriginAddress::default(),
            DestinationSpec {
                city_name: "Cali".to_string(),
                city_code: DivisionCode::new("76001"),
                state_code: "VC".to_string(),
                postal_code: Some("760001".to_string()),
            },
            PackageSpec {
                weight_kg: Decimal::new(5, 1),
                declared_value: Decimal::new(100_000, 0),
                dimensions: Dimensions::default(),
            },
        );
        let request = template.stamp(carrier(), ShipmentType::AddressToBranch);
        let body = serde_json::to_value(RateRequestBody::from_request(&request, "CO", "COP")).unwrap();

        assert_eq!(body["shipment"]["carrier"], "coordinadora");
        assert_eq!(body["shipment"]["type"], 2);
        assert_eq!(body["destination"]["city"], "76001");
        assert_eq!(body["destination"]["state"], "VC");
        assert_eq!(body["destination"]["postalCode"], "760001");
        assert!(body["destination"].get("name").is_none());
        assert_eq!(body["origin"]["city"], "11001");
        assert_eq!(body["packages"][0]["weight"], 0.5);
        assert_eq!(body["packages"][0]["declaredValue"], 100000.0);
        assert_eq!(body["packages"][0]["dimensions"]["length"], 20);
        assert_eq!(body["settings"]["currency"], "COP");
    }

    #[test]
    fn parses_rate_lines() {
        let response = raw(
            StatusCode::OK,
            json!({
                "meta": "rate",
                "data": [
                    {
                        "carrier": "coordinadora",
                        "service": "ground",
                        "serviceDescription": "Terrestre",
                        "deliveryEstimate": "2-3 días",
                        "totalPrice": 12500.5,
                        "currency": "COP",
                        "deliveryDate": {"dateDifference": 3}
                    },
                    {"service": "express", "totalPrice": "21000"}
                ]
            }),
        );

        let parsed =
            parse_rate_response(&response, &carrier(), ShipmentType::AddressToAddress, "COP")
                .unwrap();

        assert_eq!(parsed.lines.len(), 2);
        let first = &parsed.lines[0];
        assert_eq!(first.total_price, Decimal::new(125_005, 1));
        assert_eq!(first.estimated_days, Some(3));
        let second = &parsed.lines[1];
        assert_eq!(second.carrier, carrier());
        assert_eq!(second.currency, "COP");
        assert_eq!(second.total_price, Decimal::new(21_000, 0));
    }

    #[test]
    fn malformed_line_is_skipped_and_others_kept() {
        let response = raw(
            StatusCode::OK,
            json!({
                "meta": "rate",
                "data": [
                    {"service": "ground", "totalPrice": null},
                    {"totalPrice": 9000},
                    {"service": "mercancia", "totalPrice": 15000}
                ]
            }),
        );

        let parsed =
            parse_rate_response(&response, &carrier(), ShipmentType::AddressToBranch, "COP")
                .unwrap();

        assert_eq!(parsed.lines.len(), 1);
        assert_eq!(parsed.lines[0].service, "mercancia");
        assert_eq!(parsed.lines[0].total_price, Decimal::new(15_000, 0));
    }

    #[test]
    fn error_envelope_is_rejected_with_message() {
        let response = raw(
            StatusCode::BAD_REQUEST,
            json!({
                "meta": "error",
                "error": {"code": 1125, "description": "Invalid Option", "message": "Destination not covered"}
            }),
        );

        let error =
            parse_rate_response(&response, &carrier(), ShipmentType::AddressToAddress, "COP")
                .unwrap_err();

        assert_eq!(error.carrier_message(), Some("Destination not covered"));
        assert_eq!(error.error_code(), Some("1125"));
    }

    #[test]
    fn error_meta_without_body_is_rejected() {
        let response = raw(StatusCode::OK, json!({"meta": "error"}));
        let error =
            parse_rate_response(&response, &carrier(), ShipmentType::AddressToBranch, "COP")
                .unwrap_err();
        assert!(matches!(error, CarrierError::Rejected { .. }));
    }

    #[test]
    fn unparseable_body_is_protocol_error() {
        let response = RawResponse {
            status: StatusCode::OK,
            body: "<html>gateway</html>".to_string(),
        };
        let error =
            parse_rate_response(&response, &carrier(), ShipmentType::AddressToAddress, "COP")
                .unwrap_err();
        assert!(matches!(error, CarrierError::Protocol { .. }));
    }

    #[test]
    fn unparseable_error_status_maps_status() {
        let response = RawResponse {
            status: StatusCode::UNAUTHORIZED,
            body: "unauthorized".to_string(),
        };
        let error =
            parse_rate_response(&response, &carrier(), ShipmentType::AddressToAddress, "COP")
                .unwrap_err();
        assert!(matches!(error, CarrierError::Authentication { .. }));
    }

    #[test]
    fn missing_data_is_protocol_error() {
        let response = raw(StatusCode::OK, json!({"meta": "rate"}));
        let error =
            parse_rate_response(&response, &carrier(), ShipmentType::AddressToAddress, "COP")
                .unwrap_err();
        assert!(matches!(error, CarrierError::Protocol { .. }));
    }
}

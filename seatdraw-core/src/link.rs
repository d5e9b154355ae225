//! Participant links and the data carried by a participant's QR code.

use crate::error::{Result, SeatdrawError};
use crate::types::ParticipantRecord;
use serde::{Deserialize, Serialize};

pub const PARTICIPANT_ROUTE: &str = "participant";

/// Public URL of a participant's page.
pub fn participant_url(base_url: &str, participant_id: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        PARTICIPANT_ROUTE,
        participant_id
    )
}

/// Extract the participant id from a bare id, a `/participant/<id>` path or a full URL.
pub fn parse_participant_route(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SeatdrawError::invalid_route("empty participant reference"));
    }

    if !input.contains('/') {
        return Ok(input.to_string());
    }

    // Query strings and fragments are not part of the route.
    let path = input.split(['?', '#']).next().unwrap_or(input);
    let mut segments = path.split('/').filter(|s| !s.is_empty());

    while let Some(segment) = segments.next() {
        if segment == PARTICIPANT_ROUTE {
            return match segments.next() {
                Some(id) => Ok(id.to_string()),
                None => Err(SeatdrawError::invalid_route(format!(
                    "missing participant id in '{}'",
                    input
                ))),
            };
        }
    }

    Err(SeatdrawError::invalid_route(format!(
        "'{}' is not a participant link",
        input
    )))
}

/// JSON encoded into a participant's QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub participant_id: String,
    pub team_number: u32,
    pub lottery_number: u32,
}

impl From<&ParticipantRecord> for QrPayload {
    fn from(record: &ParticipantRecord) -> Self {
        Self {
            participant_id: record.id.clone(),
            team_number: record.team_number,
            lottery_number: record.lottery_number,
        }
    }
}

impl QrPayload {
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// `None` for anything that is not a well-formed payload.
    pub fn decode(encoded: &str) -> Option<Self> {
        let payload: Self = match serde_json::from_str(encoded) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!("Rejected QR payload: {}", e);
                return None;
            }
        };

        if payload.participant_id.is_empty()
            || payload.team_number == 0
            || payload.lottery_number == 0
        {
            return None;
        }

        Some(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_url() {
        assert_eq!(
            participant_url("http://localhost:3000", "abc"),
            "http://localhost:3000/participant/abc"
        );
        assert_eq!(
            participant_url("https://party.example.com/", "abc"),
            "https://party.example.com/participant/abc"
        );
    }

    #[test]
    fn test_parse_participant_route() {
        assert_eq!(parse_participant_route("abc").unwrap(), "abc");
        assert_eq!(parse_participant_route(" abc \n").unwrap(), "abc");
        assert_eq!(parse_participant_route("/participant/abc").unwrap(), "abc");
        assert_eq!(
            parse_participant_route("http://localhost:3000/participant/abc/?ref=qr#top").unwrap(),
            "abc"
        );

        assert!(matches!(
            parse_participant_route("/participant/"),
            Err(SeatdrawError::InvalidRoute(_))
        ));
        assert!(parse_participant_route("http://localhost:3000/admin").is_err());
        assert!(parse_participant_route("   ").is_err());
    }

    #[test]
    fn test_qr_payload_wire_format() {
        let payload = QrPayload {
            participant_id: "abc".to_string(),
            team_number: 4,
            lottery_number: 57,
        };
        assert_eq!(
            payload.encode().unwrap(),
            r#"{"participantId":"abc","teamNumber":4,"lotteryNumber":57}"#
        );
        assert_eq!(QrPayload::decode(&payload.encode().unwrap()), Some(payload));
    }

    #[test]
    fn test_qr_payload_rejects_invalid_data() {
        assert_eq!(QrPayload::decode("not json"), None);
        assert_eq!(
            QrPayload::decode(r#"{"participantId":"","teamNumber":1,"lotteryNumber":1}"#),
            None
        );
        assert_eq!(
            QrPayload::decode(r#"{"participantId":"a","teamNumber":0,"lotteryNumber":1}"#),
            None
        );
        assert_eq!(
            QrPayload::decode(r#"{"participantId":"a","teamNumber":1,"lotteryNumber":-3}"#),
            None
        );
        assert_eq!(QrPayload::decode(r#"{"participantId":"a"}"#), None);
    }
}

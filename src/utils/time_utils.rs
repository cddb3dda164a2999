//! BSON `DateTime`과 chrono `DateTime<Utc>` 사이의 변환 헬퍼
//!
//! 엔티티는 MongoDB에 네이티브 날짜로 저장되도록 BSON 타입을 사용하고,
//! API 응답과 만료 계산은 chrono를 사용합니다.

use chrono::{DateTime, Duration, Utc};
use mongodb::bson;

pub fn to_chrono(value: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

pub fn to_bson(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

/// 현재 시각에서 `duration`만큼 지난 시점을 BSON 날짜로 반환합니다
pub fn expires_after(duration: Duration) -> bson::DateTime {
    to_bson(Utc::now() + duration)
}

/// `expires`가 `now`보다 이전이면 만료된 것으로 봅니다
pub fn is_expired_at(expires: bson::DateTime, now: bson::DateTime) -> bool {
    expires < now
}

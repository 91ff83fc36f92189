/// Epoch seconds, either as an integer or an RFC 3339 timestamp such as
/// `2024-03-01T08:00:00+11:00`.
pub fn parse_start_time(input: &str) -> Result<i64, String> {
    if let Ok(seconds) = input.parse::<i64>() {
        return Ok(seconds);
    }

    if let Ok(timestamp) = input.parse::<jiff::Timestamp>() {
        return Ok(timestamp.as_second());
    }

    Err(String::from("Invalid start time"))
}

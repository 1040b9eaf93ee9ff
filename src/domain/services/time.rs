use crate::error::AppError;

/// Parses "HH:MM" into minutes since midnight.
pub fn time_to_minutes(time: &str) -> Result<i32, AppError> {
    let (h, m) = time
        .split_once(':')
        .ok_or_else(|| AppError::InvalidFormat(format!("time: {}", time)))?;

    let hours: i32 = h
        .parse()
        .map_err(|_| AppError::InvalidFormat(format!("time: {}", time)))?;
    let minutes: i32 = m
        .parse()
        .map_err(|_| AppError::InvalidFormat(format!("time: {}", time)))?;

    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(AppError::InvalidFormat(format!("time: {}", time)));
    }

    Ok(hours * 60 + minutes)
}

/// Inverse of [`time_to_minutes`]: zero-padded "HH:MM". Values outside
/// [0, 1440) are rejected rather than wrapped, so cursor arithmetic bugs
/// surface instead of aliasing onto the wrong wall-clock time.
pub fn minutes_to_time(minutes: i32) -> Result<String, AppError> {
    if !(0..1440).contains(&minutes) {
        return Err(AppError::InvalidFormat(format!("minutes out of range: {}", minutes)));
    }
    Ok(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}

/// Half-open interval overlap: touching endpoints do not overlap.
pub fn intervals_overlap(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> bool {
    a_start < b_end && a_end > b_start
}

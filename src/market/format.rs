/// Insert thousands separators: `1250000` -> `1,250,000`
pub fn number_with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Remaining auction time, e.g. `2d 4h`, `3h 12m`, `4m 09s` or `Ended`
pub fn format_time_left(auction_end: u64, now: u64) -> String {
    if auction_end <= now {
        return "Ended".to_string();
    }

    let secs = auction_end - now;
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3600;
    let mins = (secs % 3600) / 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m {:02}s", mins, secs % 60)
    }
}

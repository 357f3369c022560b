//! Traditional names of lunar months and days.

/// Chinese numerals; index 0 is 十 so that day names can index by `day % 10`.
const NUMERALS: [&str; 10] = ["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// Month name including 月, with 闰 before a leap month. Months 1, 11 and 12
/// are 正月, 冬月 and 腊月.
///
/// Returns `None` if `month` is not in `1..=12`.
///
/// ```
/// use lunisolar::fmt::month_name;
///
/// assert_eq!(Some("正月".to_owned()), month_name(1, false));
/// assert_eq!(Some("闰二月".to_owned()), month_name(2, true));
/// assert_eq!(Some("腊月".to_owned()), month_name(12, false));
/// ```
pub fn month_name(month: u8, leap: bool) -> Option<String> {
    let number = match month {
        1 => "正",
        2..=10 => NUMERALS[usize::from(month % 10)],
        11 => "冬",
        12 => "腊",
        _ => return None,
    };
    let prefix = if leap { "闰" } else { "" };
    Some(format!("{prefix}{number}月"))
}

/// Day name: 初一 to 初十, 十一 to 十九, 二十, 廿一 to 廿九, 三十.
///
/// Returns `None` if `day` is not in `1..=30`.
///
/// ```
/// use lunisolar::fmt::day_name;
///
/// assert_eq!(Some("初十".to_owned()), day_name(10));
/// assert_eq!(Some("廿五".to_owned()), day_name(25));
/// ```
pub fn day_name(day: u8) -> Option<String> {
    let tens = match day {
        1..=10 => "初",
        11..=19 => "十",
        20 => "二",
        21..=29 => "廿",
        30 => "三",
        _ => return None,
    };
    Some(format!("{tens}{}", NUMERALS[usize::from(day % 10)]))
}

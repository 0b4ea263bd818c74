use bizday_chrono::calendar::CalendarConfig;
use bizday_ranges::{merge_ranges, DateRange};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    // plain business-day counting over a Monday..Sunday week
    let mut cal = CalendarConfig::new();
    let week = DateRange::from("2024-01-01")?.to("2024-01-07")?;
    println!(
        "{} .. {}: {} days, {} business, {} non-business",
        week.start_date(),
        week.end_date(),
        week.duration_in_days(),
        week.business_days_in_range(&mut cal, None),
        week.non_business_days_in_range(&mut cal, None),
    );

    // a Tuesday holiday removes one business day
    cal.add_holiday("2024-01-02")?;
    let workweek = DateRange::from("2024-01-01")?.to("2024-01-05")?;
    println!(
        "with a holiday on 2024-01-02: {} business days",
        workweek.business_days_in_range(&mut cal, None),
    );

    // shifting by business days walks over weekends and holidays
    cal.clear_holidays();
    let original = DateRange::from("2024-01-01")?.to("2024-01-03")?;
    let shifted = original.shift_business_days(2, &mut cal, None);
    println!(
        "shift +2 business days: {} .. {}",
        shifted.start_date(),
        shifted.end_date(),
    );

    // expanding a weekend-only range inverts it
    let weekend = DateRange::from("2024-01-06")?.to("2024-01-07")?;
    let expanded = weekend.expand_to_business_days(&mut cal, None);
    println!(
        "expanded weekend: {} .. {} (empty: {})",
        expanded.start_date(),
        expanded.end_date(),
        expanded.is_empty(),
    );

    // a mid-week holiday splits the week into two business-day runs
    cal.add_holiday("2024-01-03")?;
    for run in week.business_day_ranges(&mut cal, None) {
        println!("business-day run: {} .. {}", run.start_date(), run.end_date());
    }

    // a built-in named calendar
    cal.reset();
    cal.load_holiday_calendar("US");
    println!("US holidays loaded: {}", cal.holidays().count());

    // merging overlapping and adjacent ranges
    let merged = merge_ranges(vec![
        DateRange::from("2024-01-01")?.to("2024-01-10")?,
        DateRange::from("2024-01-08")?.to("2024-01-15")?,
        DateRange::from("2024-01-20")?.to("2024-01-25")?,
    ]);
    for range in merged {
        println!("merged: {} .. {}", range.start_date(), range.end_date());
    }

    Ok(())
}

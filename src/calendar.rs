use chrono::{Datelike, Duration, Months, NaiveDate};

/// Rows in the month grid, one per weekday.
pub const WEEKDAY_ROWS: u8 = 7;

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// Last day of the month, inclusive.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(add_months(date, 1)) - Duration::days(1)
}

pub fn add_months(date: NaiveDate, n: i32) -> NaiveDate {
    if n >= 0 {
        date + Months::new(n as u32)
    } else {
        date - Months::new(n.unsigned_abs())
    }
}

/// Start of the week containing `date`. Weeks begin on Sunday.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Ordered week-start dates covering every day of the reference month: the
/// first is on or before the 1st, then steps of exactly 7 days while the
/// start is on or before the month's last day.
pub fn week_columns(month: NaiveDate) -> Vec<NaiveDate> {
    let end = month_end(month);
    let mut columns = Vec::new();
    let mut column = week_start(month_start(month));
    while column <= end {
        columns.push(column);
        column = column + Duration::days(7);
    }
    columns
}

/// Grid cell date: week-column start plus the weekday row index.
pub fn cell_date(column_start: NaiveDate, row: u8) -> NaiveDate {
    column_start + Duration::days(i64::from(row))
}

pub fn in_month(cell: NaiveDate, month: NaiveDate) -> bool {
    cell.year() == month.year() && cell.month() == month.month()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_bounds() {
        assert_eq!(month_start(date(2026, 4, 17)), date(2026, 4, 1));
        assert_eq!(month_end(date(2026, 4, 17)), date(2026, 4, 30));
        assert_eq!(month_end(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(month_end(date(2026, 12, 31)), date(2026, 12, 31));
    }

    #[test]
    fn add_months_crosses_year_boundaries() {
        assert_eq!(add_months(date(2026, 12, 15), 1), date(2027, 1, 15));
        assert_eq!(add_months(date(2026, 1, 15), -1), date(2025, 12, 15));
        // Day clamps when the target month is shorter.
        assert_eq!(add_months(date(2026, 1, 31), 1), date(2026, 2, 28));
    }

    #[test]
    fn week_start_is_sunday_on_or_before() {
        // 2026-04-01 is a Wednesday; the containing week starts 2026-03-29.
        assert_eq!(week_start(date(2026, 4, 1)), date(2026, 3, 29));
        // A Sunday is its own week start.
        assert_eq!(week_start(date(2026, 3, 29)), date(2026, 3, 29));
    }

    #[test]
    fn columns_cover_a_wednesday_starting_month() {
        // April 2026: 1st on Wednesday, 30 days.
        let columns = week_columns(date(2026, 4, 1));
        assert_eq!(columns.first().copied(), Some(date(2026, 3, 29)));
        assert_eq!(
            columns,
            vec![
                date(2026, 3, 29),
                date(2026, 4, 5),
                date(2026, 4, 12),
                date(2026, 4, 19),
                date(2026, 4, 26),
            ]
        );
        // The last column spans through the last day of the month.
        let last = *columns.last().unwrap();
        assert!(cell_date(last, WEEKDAY_ROWS - 1) >= month_end(date(2026, 4, 1)));
    }

    #[test]
    fn columns_when_the_first_is_a_sunday() {
        // March 2026 starts on a Sunday; no leading out-of-month cells.
        let columns = week_columns(date(2026, 3, 1));
        assert_eq!(columns.first().copied(), Some(date(2026, 3, 1)));
        assert_eq!(columns.len(), 5);
    }

    #[test]
    fn grid_is_rectangular_with_out_of_month_cells_present() {
        let month = date(2026, 4, 1);
        let columns = week_columns(month);
        let mut in_month_cells = 0;
        for column in &columns {
            for row in 0..WEEKDAY_ROWS {
                let cell = cell_date(*column, row);
                if in_month(cell, month) {
                    in_month_cells += 1;
                }
            }
        }
        assert_eq!(in_month_cells, 30);
        assert_eq!(columns.len() * usize::from(WEEKDAY_ROWS), 35);
        assert!(!in_month(date(2026, 3, 31), month));
        assert!(in_month(date(2026, 4, 30), month));
    }
}

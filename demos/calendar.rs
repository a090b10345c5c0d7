use chrono::NaiveDate;
use rb_index::{Interval, IntervalIndex, SharedIntervalIndex};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn booking(from: &str, to: &str) -> Interval<NaiveDate> {
    Interval::new(day(from), day(to)).unwrap()
}

fn main() {
    let mut bookings = IntervalIndex::<NaiveDate, &str>::new();
    bookings.upsert(booking("2024-03-01", "2024-03-05"), "alice");
    bookings.upsert(booking("2024-03-04", "2024-03-09"), "bob");
    bookings.upsert(booking("2024-03-12", "2024-03-12"), "carol");

    // touching the last day of a booking counts as a clash
    let request = booking("2024-03-09", "2024-03-11");
    assert!(bookings.overlaps(&request));
    let clashes: Vec<_> = bookings
        .find_all_overlapping(&booking("2024-03-03", "2024-03-12"))
        .unwrap()
        .into_iter()
        .map(|(_, who)| *who)
        .collect();
    assert_eq!(clashes, ["alice", "bob", "carol"]);

    let free = booking("2024-03-10", "2024-03-11");
    assert!(bookings.find_first_overlapping(&free).is_err());

    let shared = SharedIntervalIndex::from(bookings);
    std::thread::scope(|s| {
        s.spawn(|| shared.upsert(free.clone(), "dave"));
    });
    assert_eq!(shared.search(&free), Ok("dave"));
    for (when, who) in shared.in_order() {
        println!("{when}: {who}");
    }
}

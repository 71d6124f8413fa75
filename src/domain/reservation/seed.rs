use super::model::NewReservation;

/// Demonstration data inserted into an empty ledger.
pub fn demo_reservations() -> Vec<NewReservation> {
    [
        ("María López", "maria@example.com", "3001112222", "2025-11-10", "2025-11-13", 1, 240.0),
        ("Carlos Pérez", "carlos@example.com", "3003334444", "2025-12-01", "2025-12-05", 2, 600.0),
        ("Ana Gómez", "ana@example.com", "3005556666", "2026-01-08", "2026-01-10", 1, 160.0),
    ]
    .into_iter()
    .map(
        |(name, email, phone, arrival, departure, rooms, total)| NewReservation {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            arrival_date: arrival.to_string(),
            departure_date: departure.to_string(),
            room_count: rooms,
            total_amount: total,
        },
    )
    .collect()
}

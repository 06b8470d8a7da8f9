/// Maps a 1-10 rating onto Letterboxd's half-star scale (0.5 to 5.0).
///
/// Anything at or below zero means "not rated" and maps to 0.
pub fn to_letterboxd_rating(rating: f32) -> f32 {
    if rating <= 0.0 {
        return 0.0;
    }

    let letterboxd_rating = rating / 10.0 * 5.0;
    (letterboxd_rating * 2.0).round() / 2.0
}

//! Cookoff skill scoring.
//!
//! The score is a weighted sum of experience and repertoire with a
//! specialty bonus and an age modifier:
//!
//! ```text
//! skill = years_experience * 4
//!       + dish_count * 2
//!       + 5 when the cookoff cuisine matches the chef's specialty
//!       - 5 when (age < 25 and years_experience < 4) or age > 55
//! ```

use crate::{Chef, Cuisine};

const EXPERIENCE_WEIGHT: f64 = 4.0;
const DISH_WEIGHT: f64 = 2.0;
const SPECIALTY_BONUS: f64 = 5.0;
const AGE_PENALTY: f64 = 5.0;

/// Compute a chef's skill for a cookoff in the given cuisine.
pub fn cookoff_skill(chef: &Chef, cuisine: Cuisine) -> f64 {
    let specialty_bonus = if chef.specialty.eq_ignore_ascii_case(cuisine.as_str()) {
        SPECIALTY_BONUS
    } else {
        0.0
    };

    let age_modifier = if (chef.age < 25 && chef.years_experience < 4) || chef.age > 55 {
        -AGE_PENALTY
    } else {
        0.0
    };

    chef.years_experience as f64 * EXPERIENCE_WEIGHT
        + chef.dish_count() as f64 * DISH_WEIGHT
        + specialty_bonus
        + age_modifier
}

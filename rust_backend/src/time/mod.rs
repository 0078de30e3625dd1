pub mod historical;

pub use historical::{
    date_range, generate_historical_dates, generate_historical_dates_for_year,
};

use clap::Parser;
use salat::{
    Configuration, LenientParse, Location, MethodKey, ObservationDate, Prayer, PrayerTimesEngine,
    TimeFormat,
};

#[derive(Parser)]
#[command(name = "daily_schedule", about = "Today's prayer times in every output format")]
struct Args {
    /// Method code (MWL, ISNA, Makkah, ...); unknown codes fall back to MWL
    #[arg(default_value = "MWL")]
    method: String,
    /// Latitude in degrees, north positive
    #[arg(default_value_t = 21.4225, allow_negative_numbers = true)]
    lat: f64,
    /// Longitude in degrees, east positive
    #[arg(default_value_t = 39.8262, allow_negative_numbers = true)]
    lon: f64,
    /// UTC offset in hours
    #[arg(default_value_t = 3.0, allow_negative_numbers = true)]
    utc_offset: f64,
}

fn main() {
    let args = Args::parse();
    let method = MethodKey::parse_lenient(&args.method);
    let (lat, lon, offset) = (args.lat, args.lon, args.utc_offset);

    let location = match Location::at_sea_level(lat, lon) {
        Ok(location) => location,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    let today = chrono::Local::now().date_naive();
    let date = match ObservationDate::new(today).with_utc_offset_hours(offset) {
        Ok(date) => date,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let engine = PrayerTimesEngine::new();
    let method_name = &engine.describe_method(method).name;
    println!("{method_name} at ({lat}, {lon}), {today} {}", date.timezone_label());

    let formats = [
        TimeFormat::H24,
        TimeFormat::H12,
        TimeFormat::Float,
        TimeFormat::Iso8601,
    ];
    let results: Vec<_> = formats
        .iter()
        .map(|&format| {
            let config = Configuration::new(method).with_time_format(format);
            engine.compute_times(&date, &location, &config)
        })
        .collect();

    for prayer in Prayer::ALL {
        print!("{:<11}", prayer.label());
        for result in &results {
            print!(" {:>26}", result.get(prayer).to_string());
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_negative_coordinates() {
        let args = Args::try_parse_from(["daily_schedule", "ISNA", "39.7", "-86.4", "-5"]).unwrap();
        assert_eq!(args.method, "ISNA");
        assert_eq!((args.lat, args.lon, args.utc_offset), (39.7, -86.4, -5.0));
    }

    #[test]
    fn test_rejects_malformed_longitude() {
        let parsed = Args::try_parse_from(["daily_schedule", "ISNA", "39.7", "-86.4x", "-5"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_defaults_to_makkah() {
        let args = Args::try_parse_from(["daily_schedule"]).unwrap();
        assert_eq!(args.method, "MWL");
        assert_eq!((args.lat, args.lon, args.utc_offset), (21.4225, 39.8262, 3.0));
    }
}

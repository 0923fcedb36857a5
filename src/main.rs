//! Ride Matcher - demo binary
//!
//! Walks one driver and two passengers through registration, movement,
//! acceptance and conclusion, printing what the matcher does at each step.
//! Set `RUST_LOG=debug` to see the library's log output.

use ride_matcher::types::cost;
use ride_matcher::{
    Location, MatchError, Matcher, MatcherConfig, Participant, PreferredMatch, RideRole, User,
    UserStars,
};

fn main() -> Result<(), MatchError> {
    env_logger::init();

    println!("===========================================");
    println!("  Ride Matcher");
    println!("===========================================");
    println!();

    let config = MatcherConfig::default();
    println!(
        "Universe ({}, {}) to ({}, {}), radius {}",
        config.top_left.x,
        config.top_left.y,
        config.bottom_right.x,
        config.bottom_right.y,
        config.radius
    );
    let mut matcher = Matcher::new(config)?;

    let station = Location::new(0.0, 0.0);
    let airport = Location::new(600.0, -400.0);

    let dan = User::shared("dan", "Dan");
    let pat = User::shared("pat", "Pat");
    let sam = User::shared("sam", "Sam");
    pat.set_preference(PreferredMatch::Cheaper);

    let fare = cost::to_fixed("12.50").unwrap_or(0);
    let driver = matcher.add_ride(dan.clone(), station, airport, Some("AA-12-BC".into()), fare)?;
    let first = matcher.add_ride(pat.clone(), Location::new(40.0, 40.0), airport, None, 0)?;
    let second = matcher.add_ride(sam.clone(), Location::new(3.0, 4.0), airport, None, 0)?;
    println!(
        "Registered driver ride {} (fare {}) and passenger rides {} and {}",
        driver,
        cost::from_fixed_trimmed(fare),
        first,
        second
    );
    println!();

    println!("Passenger ride {} moves next to the station...", first);
    let proposals = matcher.update_ride(first, Location::new(2.0, 1.0))?;
    for proposal in &proposals {
        println!(
            "  match {}: driver ride {} / passenger ride {}",
            proposal.id, proposal.driver_ride, proposal.passenger_ride
        );
    }

    let Some(proposal) = proposals.first() else {
        println!("No proposals.");
        return Ok(());
    };

    matcher.accept_match(first, proposal.id)?;
    matcher.accept_match(driver, proposal.id)?;
    println!(
        "Both sides accepted match {}; rides still indexed: {}",
        proposal.id,
        matcher.indexed_ride_count()
    );

    println!("Passenger ride {} moves too...", second);
    let late = matcher.update_ride(second, Location::new(1.0, 1.0))?;
    println!("  {} proposals (the driver is taken)", late.len());
    println!();

    matcher.conclude_ride(first, UserStars::FiveStars)?;
    matcher.conclude_ride(driver, UserStars::FourStars).or_else(|e| match e {
        MatchError::UnknownMatch(id) => {
            println!("Match {} was already concluded by the passenger", id);
            Ok(())
        }
        other => Err(other),
    })?;

    println!(
        "Dan's driver average: {:.1}",
        dan.average(RideRole::Driver)
    );
    println!(
        "Pat's passenger average: {:.1}",
        pat.average(RideRole::Passenger)
    );
    println!("State root: {}", matcher.state_root_hex()?);

    Ok(())
}

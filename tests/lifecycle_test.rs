//! End-to-end behaviour of the matcher: who gets paired, in which order,
//! and what happens when matches are accepted and concluded.

use std::sync::Arc;

use ride_matcher::types::cost;
use ride_matcher::{
    Location, MatchError, Matcher, MatcherConfig, Participant, PreferredMatch, QuadError,
    RideId, RideRole, User, UserStars,
};

// ============================================================================
// HELPERS
// ============================================================================

const HOME: Location = Location::new(0.0, 0.0);
const WORK: Location = Location::new(250.0, 120.0);

fn matcher() -> Matcher {
    let _ = env_logger::builder().is_test(true).try_init();
    Matcher::new(MatcherConfig::default()).unwrap()
}

fn offer(m: &mut Matcher, owner: Arc<User>, at: Location, to: Location, fare: &str) -> RideId {
    let plate = format!("{}-CAR", owner.nick());
    m.add_ride(owner, at, to, Some(plate), cost::to_fixed(fare).unwrap())
        .unwrap()
}

fn request(m: &mut Matcher, owner: Arc<User>, at: Location, to: Location) -> RideId {
    m.add_ride(owner, at, to, None, 0).unwrap()
}

fn rated_driver(nick: &str, stars: UserStars) -> Arc<User> {
    let user = User::shared(nick, nick);
    user.add_rating(RideRole::Driver, stars);
    user
}

// ============================================================================
// MATCHABILITY
// ============================================================================

#[test]
fn same_role_rides_never_pair() {
    let mut m = matcher();

    let d1 = offer(&mut m, User::shared("a", "A"), HOME, WORK, "5");
    let d2 = offer(&mut m, User::shared("b", "B"), HOME, WORK, "5");
    let p1 = request(&mut m, User::shared("c", "C"), Location::new(100.0, 100.0), WORK);
    let p2 = request(&mut m, User::shared("d", "D"), Location::new(100.0, 100.0), WORK);

    assert!(m.update_ride(d1, HOME).unwrap().is_empty());
    assert!(m.update_ride(d2, HOME).unwrap().is_empty());
    assert!(m.update_ride(p1, Location::new(100.0, 100.0)).unwrap().is_empty());
    assert!(m.update_ride(p2, Location::new(100.0, 100.0)).unwrap().is_empty());
    assert_eq!(m.pending_match_count(), 0);
}

#[test]
fn opposite_rides_together_see_each_other() {
    let mut m = matcher();

    let d = offer(&mut m, User::shared("d", "D"), HOME, WORK, "5");
    let p = request(&mut m, User::shared("p", "P"), HOME, WORK);

    let from_driver = m.update_ride(d, HOME).unwrap();
    let from_passenger = m.update_ride(p, HOME).unwrap();

    assert_eq!(from_driver.len(), 1);
    assert_eq!(from_passenger.len(), 1);
    assert_eq!(from_driver[0].driver_ride, d);
    assert_eq!(from_driver[0].passenger_ride, p);
    assert_eq!(from_passenger[0].driver_ride, d);
    assert_eq!(from_passenger[0].passenger_ride, p);
}

#[test]
fn distance_limits_apply_to_position_and_destination() {
    let mut m = matcher();

    let d = offer(&mut m, User::shared("d", "D"), HOME, WORK, "5");
    let too_far_now = request(&mut m, User::shared("a", "A"), Location::new(10.5, 0.0), WORK);
    let elsewhere = request(
        &mut m,
        User::shared("b", "B"),
        Location::new(1.0, 0.0),
        Location::new(WORK.x, WORK.y + 11.0),
    );
    let on_the_edge = request(
        &mut m,
        User::shared("c", "C"),
        Location::new(6.0, 8.0),
        Location::new(WORK.x + 6.0, WORK.y - 8.0),
    );

    let proposals = m.update_ride(d, HOME).unwrap();
    let passengers: Vec<RideId> = proposals.iter().map(|p| p.passenger_ride).collect();

    assert_eq!(passengers, vec![on_the_edge]);
    assert!(!passengers.contains(&too_far_now));
    assert!(!passengers.contains(&elsewhere));
}

#[test]
fn custom_radius_widens_matching() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut m = Matcher::new(MatcherConfig::default().with_radius(50.0)).unwrap();

    let d = offer(&mut m, User::shared("d", "D"), HOME, WORK, "5");
    request(&mut m, User::shared("p", "P"), Location::new(30.0, 30.0), WORK);

    assert_eq!(m.update_ride(d, HOME).unwrap().len(), 1);
}

// ============================================================================
// RANKING
// ============================================================================

#[test]
fn better_preference_puts_best_rated_first() {
    let mut m = matcher();

    let three = offer(&mut m, rated_driver("c", UserStars::ThreeStars), HOME, WORK, "5");
    let five = offer(&mut m, rated_driver("a", UserStars::FiveStars), HOME, WORK, "5");
    let four = offer(&mut m, rated_driver("b", UserStars::FourStars), HOME, WORK, "5");

    let passenger = User::shared("p", "P");
    passenger.set_preference(PreferredMatch::Better);
    let p = request(&mut m, passenger, HOME, WORK);

    let order: Vec<RideId> = m
        .update_ride(p, HOME)
        .unwrap()
        .iter()
        .map(|x| x.driver_ride)
        .collect();

    assert_eq!(order, vec![five, four, three]);
}

#[test]
fn cheaper_preference_puts_lowest_cost_first() {
    let mut m = matcher();

    let expensive = offer(&mut m, User::shared("a", "A"), HOME, WORK, "25.0");
    let cheap = offer(&mut m, User::shared("b", "B"), HOME, WORK, "10.0");

    let passenger = User::shared("p", "P");
    passenger.set_preference(PreferredMatch::Cheaper);
    let p = request(&mut m, passenger, HOME, WORK);

    let order: Vec<RideId> = m
        .update_ride(p, HOME)
        .unwrap()
        .iter()
        .map(|x| x.driver_ride)
        .collect();

    assert_eq!(order, vec![cheap, expensive]);
}

#[test]
fn closer_preference_puts_nearest_first() {
    let mut m = matcher();

    let far = offer(&mut m, User::shared("a", "A"), Location::new(9.0, 0.0), WORK, "1");
    let near = offer(&mut m, User::shared("b", "B"), Location::new(0.0, 1.0), WORK, "1");

    let passenger = User::shared("p", "P");
    passenger.set_preference(PreferredMatch::Closer);
    let p = request(&mut m, passenger, Location::new(50.0, 50.0), WORK);

    let order: Vec<RideId> = m
        .update_ride(p, HOME)
        .unwrap()
        .iter()
        .map(|x| x.driver_ride)
        .collect();

    assert_eq!(order, vec![near, far]);
}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[test]
fn accepted_ride_disappears_from_other_queries() {
    let mut m = matcher();

    let d = offer(&mut m, User::shared("d", "D"), HOME, WORK, "5");
    let p1 = request(&mut m, User::shared("a", "A"), HOME, WORK);
    let p2 = request(&mut m, User::shared("b", "B"), HOME, WORK);

    let proposal = m.update_ride(p1, HOME).unwrap().remove(0);
    m.accept_match(d, proposal.id).unwrap();

    // the driver is bound after one side accepted
    assert!(m.update_ride(p2, HOME).unwrap().is_empty());
    assert!(m.update_ride(p2, Location::new(1.0, 1.0)).unwrap().is_empty());
    assert!(m.update_ride(d, Location::new(2.0, 2.0)).unwrap().is_empty());
    assert_eq!(m.ride(d).unwrap().current(), HOME);
}

#[test]
fn accept_fails_when_partner_took_another_match() {
    let mut m = matcher();

    let driver = User::shared("dan", "Dan");
    let d = offer(&mut m, driver.clone(), HOME, WORK, "5");
    let p1 = request(&mut m, User::shared("a", "A"), HOME, WORK);
    let p2 = request(&mut m, User::shared("b", "B"), HOME, WORK);

    let m1 = m.update_ride(p1, HOME).unwrap().remove(0);
    let m2 = m.update_ride(p2, HOME).unwrap().remove(0);
    assert_eq!(m2.driver_ride, d);

    m.accept_match(d, m1.id).unwrap();
    m.accept_match(p1, m1.id).unwrap();
    let before = m.compute_state_root().unwrap();

    assert_eq!(
        m.accept_match(p2, m2.id),
        Err(MatchError::AlreadyMatched {
            ride: d,
            match_id: m1.id
        })
    );
    assert_eq!(m.compute_state_root().unwrap(), before);

    // the passenger is still searching and cannot rate the driver
    assert!(m.is_indexed(p2));
    assert!(!m.ride(p2).unwrap().is_matched());
    assert_eq!(
        m.conclude_ride(p2, UserStars::OneStar),
        Err(MatchError::RideNotMatched(p2))
    );
    assert_eq!(driver.rating_count(RideRole::Driver), 0);
}

#[test]
fn conclude_rates_the_other_side_once() {
    let mut m = matcher();

    let driver = User::shared("d", "D");
    let passenger = User::shared("p", "P");
    let d = offer(&mut m, driver.clone(), HOME, WORK, "5");
    let p = request(&mut m, passenger.clone(), HOME, WORK);

    let proposal = m.update_ride(d, HOME).unwrap().remove(0);
    m.accept_match(d, proposal.id).unwrap();
    m.accept_match(p, proposal.id).unwrap();

    m.conclude_ride(d, UserStars::TwoStars).unwrap();

    assert_eq!(passenger.rating_count(RideRole::Passenger), 1);
    assert_eq!(passenger.average(RideRole::Passenger), 2.0);
    assert_eq!(passenger.rating_count(RideRole::Driver), 0);
    assert_eq!(driver.rating_count(RideRole::Driver), 0);
    assert!(m.ride_match(proposal.id).is_none());

    // second conclude, from either side, is a lookup miss
    assert_eq!(
        m.conclude_ride(d, UserStars::FiveStars),
        Err(MatchError::UnknownMatch(proposal.id))
    );
    assert_eq!(
        m.conclude_ride(p, UserStars::FiveStars),
        Err(MatchError::UnknownMatch(proposal.id))
    );
    assert_eq!(passenger.rating_count(RideRole::Passenger), 1);
    assert_eq!(driver.rating_count(RideRole::Driver), 0);

    // the concluded rides stay closed
    assert!(m.update_ride(p, HOME).unwrap().is_empty());
    assert!(m.ride(d).is_some());
}

#[test]
fn lifecycle_errors_leave_state_unchanged() {
    let mut m = matcher();

    let d = offer(&mut m, User::shared("d", "D"), HOME, WORK, "5");
    let p = request(&mut m, User::shared("p", "P"), HOME, WORK);
    m.update_ride(p, HOME).unwrap();
    let before = m.compute_state_root().unwrap();

    assert_eq!(m.accept_match(d, 77), Err(MatchError::UnknownMatch(77)));
    assert_eq!(m.accept_match(77, 1), Err(MatchError::UnknownRide(77)));
    assert_eq!(
        m.conclude_ride(p, UserStars::OneStar),
        Err(MatchError::RideNotMatched(p))
    );
    assert_eq!(
        m.conclude_ride(77, UserStars::OneStar),
        Err(MatchError::UnknownRide(77))
    );

    assert_eq!(m.compute_state_root().unwrap(), before);
    assert_eq!(m.indexed_ride_count(), 2);
}

#[test]
fn out_of_bounds_update_is_rejected() {
    let mut m = matcher();
    let p = request(&mut m, User::shared("p", "P"), HOME, WORK);

    let err = m.update_ride(p, Location::new(2000.0, 0.0)).unwrap_err();
    assert_eq!(
        err,
        MatchError::Quad(QuadError::PointOutOfBounds { x: 2000.0, y: 0.0 })
    );

    assert_eq!(m.ride(p).unwrap().current(), HOME);
    assert!(m.is_indexed(p));
}

#[test]
fn same_operations_same_state_root() {
    fn run() -> [u8; 32] {
        let mut m = matcher();
        let d = offer(&mut m, User::shared("d", "D"), HOME, WORK, "7.5");
        let p = request(&mut m, User::shared("p", "P"), Location::new(5.0, 5.0), WORK);
        let proposal = m.update_ride(p, HOME).unwrap().remove(0);
        m.accept_match(p, proposal.id).unwrap();
        m.accept_match(d, proposal.id).unwrap();
        m.compute_state_root().unwrap()
    }

    assert_eq!(run(), run());
}

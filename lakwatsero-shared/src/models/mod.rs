pub mod booking;
pub mod flight;
pub mod payment;
pub mod seat;
pub mod user;

pub use booking::{
    BookedPassenger, Booking, BookingRequest, BookingStatus, FlightRef, ManifestPassenger, TripType,
};
pub use flight::{Flight, FlightPage, NewFlight};
pub use payment::{
    GcashActions, GcashCharge, GcashChargeRequest, GcashVerification, GcashVerificationRequest, PaymentIntent,
    PaymentIntentRequest, PaymentRecord, RecordedPayment,
};
pub use seat::Seat;
pub use user::{LoginRequest, LoginResponse, UserDetails};

pub mod go_registrations;

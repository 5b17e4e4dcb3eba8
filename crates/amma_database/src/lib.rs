//! Persistence service client for AMMA.
//!
//! Talks to a hosted Supabase project over its PostgREST interface and
//! implements [`amma_interface::PatientFileStore`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;

pub use client::SupabaseClient;

mod errors;
mod graphs;
mod helpers;
mod round_trip;
mod scenarios;

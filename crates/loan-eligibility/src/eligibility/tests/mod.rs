mod common;
mod encoder;
mod service;

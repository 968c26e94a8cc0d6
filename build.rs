fn main() {
    // Only the device build needs the ESP-IDF environment; host builds
    // (tests, fuzzing) compile the pure-logic library alone.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}

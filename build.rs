fn main() {
    // ESP-IDF link arguments and sysenv are only needed for the hardware build;
    // host simulation and tests build without embuild.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}

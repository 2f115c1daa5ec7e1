fn main() {
    // Only ESP-IDF builds carry the sysenv exported by esp-idf-sys
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}

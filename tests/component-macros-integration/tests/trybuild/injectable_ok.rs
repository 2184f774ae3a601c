use syringe::{Injectable, Lifetime};

trait Mailer {}

#[derive(Injectable)]
#[injectable(singleton, interfaces(Mailer), name = "Smtp")]
struct SmtpMailer;

impl Mailer for SmtpMailer {}

#[derive(Injectable)]
#[injectable(skip)]
enum Mode {
    Fast,
}

fn main() {
    let descriptor = <SmtpMailer as Injectable>::type_descriptor();
    assert_eq!(descriptor.name, "Smtp");
    assert_eq!(descriptor.declared_lifetime, Some(Lifetime::Singleton));
    assert!(!<Mode as Injectable>::type_descriptor().participates);
    let _ = Mode::Fast;
}

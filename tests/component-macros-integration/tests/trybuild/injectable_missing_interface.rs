#![allow(dead_code)]

use syringe::Injectable;

trait Mailer {}

#[derive(Injectable)]
#[injectable(interfaces(Mailer))]
struct NotAMailer;

fn main() {}

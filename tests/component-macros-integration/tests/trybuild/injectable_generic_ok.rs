use syringe::Injectable;

#[derive(Injectable)]
struct Repository<T: Clone> {
    items: Vec<T>,
}

fn main() {
    let descriptor = <Repository<u8> as Injectable>::type_descriptor();
    assert!(descriptor.is_open_generic);
    assert!(descriptor.full_name.ends_with("::Repository"));
    let _ = Repository::<u8> { items: Vec::new() }.items;
}

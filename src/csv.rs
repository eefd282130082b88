/// Serializes records into a CSV document with a header row.
pub fn serialize(items: impl Iterator<Item = impl serde::Serialize>) -> Vec<u8> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for item in items {
        wtr.serialize(item).unwrap()
    }
    wtr.into_inner().unwrap()
}

/// Deserializes a CSV document. Records are expected to be well-formed;
/// the factor datasets parsed with this are embedded in the crate.
pub fn deserialize<'a, D: serde::de::DeserializeOwned + 'a>(
    data: &'a [u8],
) -> impl Iterator<Item = D> + 'a {
    let rdr = csv::ReaderBuilder::new()
        .delimiter(b',')
        .from_reader(std::io::Cursor::new(data));
    rdr.into_deserialize().into_iter().map(|r| {
        let record: D = r.unwrap();
        record
    })
}

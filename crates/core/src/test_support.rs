pub const TAG_MAKE: u16 = 0x010f;
pub const TAG_DATE_TIME: u16 = 0x0132;

const ASCII: u16 = 2;

pub fn tiff_bytes(entries: &[(u16, &str)]) -> Vec<u8> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|(tag, _)| *tag);

    let data_start = 8 + 2 + 12 * sorted.len() + 4;
    let mut out = Vec::new();
    let mut data = Vec::new();

    out.extend_from_slice(b"II*\0");
    out.extend_from_slice(&8u32.to_le_bytes());
    out.extend_from_slice(&(sorted.len() as u16).to_le_bytes());

    for (tag, value) in &sorted {
        let mut bytes = value.as_bytes().to_vec();
        bytes.push(0);

        out.extend_from_slice(&tag.to_le_bytes());
        out.extend_from_slice(&ASCII.to_le_bytes());
        out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
        if bytes.len() <= 4 {
            let mut inline = bytes;
            inline.resize(4, 0);
            out.extend_from_slice(&inline);
        } else {
            out.extend_from_slice(&((data_start + data.len()) as u32).to_le_bytes());
            data.extend_from_slice(&bytes);
            if data.len() % 2 == 1 {
                data.push(0);
            }
        }
    }

    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend(data);
    out
}

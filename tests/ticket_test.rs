//! Tests for ticket rendering

use fusionx::testing::sample_booking;
use fusionx::{render_default_ticket, render_ticket_on_template, TicketData, TicketRenderError};

fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
    let img = image::load_from_memory(bytes).expect("ticket must decode as an image");
    (img.width(), img.height())
}

fn white_template(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]));
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .unwrap();
    bytes
}

#[test]
fn test_default_ticket_is_always_800_by_400() {
    for members in [1, 2, 5] {
        let booking = sample_booking(members);
        for index in 0..members {
            let data = TicketData::for_member(&booking, index);
            let bytes = render_default_ticket(&data).unwrap();
            assert_eq!(png_dimensions(&bytes), (800, 400));
        }
    }
}

#[test]
fn test_templated_ticket_keeps_template_dimensions() {
    let booking = sample_booking(1);
    let data = TicketData::for_member(&booking, 0);

    let bytes = render_ticket_on_template(&white_template(1000, 500), &data).unwrap();
    assert_eq!(png_dimensions(&bytes), (1000, 500));
}

#[test]
fn test_corrupt_template_fails_instead_of_falling_back() {
    let booking = sample_booking(1);
    let data = TicketData::for_member(&booking, 0);

    let err = render_ticket_on_template(b"definitely not a PNG", &data).unwrap_err();
    assert!(matches!(err, TicketRenderError::Decode(_)));
}

#[test]
fn test_member_code_resolution_on_ticket_data() {
    let booking = sample_booking(3);

    let primary = TicketData::for_member(&booking, 0);
    assert_eq!(primary.member_code, "FX001");

    let second = TicketData::for_member(&booking, 1);
    let third = TicketData::for_member(&booking, 2);
    for data in [&second, &third] {
        assert_eq!(data.member_code.len(), 6);
        assert_ne!(data.member_code, "FX001");
    }
    assert_ne!(second.member_code, third.member_code);
}

#[test]
fn test_ticket_data_carries_member_position() {
    let booking = sample_booking(4);
    let data = TicketData::for_member(&booking, 2);
    assert_eq!(data.member_index, 2);
    assert_eq!(data.total_members, 4);
    assert_eq!(data.member_name, "Member 3");
}

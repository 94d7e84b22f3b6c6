//! Synthetic K4 all-patch dumps built in code.

#![allow(dead_code)]

pub const DUMP_LEN: usize = 15123;
pub const SINGLE_OFFSET: usize = 8;
pub const SINGLE_SIZE: usize = 131;
pub const MULTI_OFFSET: usize = 8392;
pub const MULTI_SIZE: usize = 77;
pub const DRUM_OFFSET: usize = 13320;
pub const EFFECT_OFFSET: usize = 14002;
pub const EFFECT_SIZE: usize = 35;
pub const EOX_OFFSET: usize = 15122;

pub fn single_name(index: usize) -> String {
    format!("SINGLE {index:02} ")
}

pub fn multi_name(index: usize) -> String {
    format!("MULTI  {index:02} ")
}

/// A single record with every bipolar parameter centered.
fn single_record(index: usize) -> Vec<u8> {
    let mut record = vec![50u8; SINGLE_SIZE];
    record[..10].copy_from_slice(single_name(index).as_bytes());
    // submix, modes, mutes/vibrato shape, bend/wheel assign
    record[12..=15].fill(0);
    record[24] = 0;
    for s in 0..4 {
        record[34 + s] = 0;
        record[38 + s] = index as u8;
        record[42 + s] = 24;
        record[54 + s] = 0;
    }
    record[104] = 0;
    record[105] = 0;
    record
}

fn multi_record(index: usize) -> Vec<u8> {
    let mut record = vec![0u8; MULTI_SIZE];
    record[..10].copy_from_slice(multi_name(index).as_bytes());
    record[10] = 90;
    for section in 0..8 {
        let base = 12 + section * 8;
        record[base] = section as u8;
        record[base + 2] = 127;
        record[base + 6] = 24;
        record[base + 7] = 50;
    }
    record
}

fn drum_block() -> Vec<u8> {
    let mut block = vec![0u8; 682];
    block[0] = 9;
    block[1] = 100;
    block[2] = 50;
    block
}

fn effect_record(index: usize) -> Vec<u8> {
    let mut record = vec![0u8; EFFECT_SIZE];
    record[0] = (index % 16) as u8;
    for submix in 0..8 {
        record[10 + submix * 3] = 7;
    }
    record
}

/// A complete, well-formed all-patch data dump on MIDI channel 1.
pub fn bank_dump() -> Vec<u8> {
    let mut dump = vec![0xF0, 0x40, 0x00, 0x22, 0x00, 0x04, 0x00, 0x00];
    for i in 0..64 {
        dump.extend(single_record(i));
    }
    for i in 0..64 {
        dump.extend(multi_record(i));
    }
    dump.extend(drum_block());
    for i in 0..32 {
        dump.extend(effect_record(i));
    }
    dump.push(0xF7);
    assert_eq!(dump.len(), DUMP_LEN);
    dump
}

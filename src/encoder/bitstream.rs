/// Header assembly, termination/padding and block interleaving of the data
/// codewords.
use super::charset::CharacterSetEci;
use super::reed_solomon::ReedSolomonEncoder;
use crate::error::{QrError, Result};
use crate::models::{Mode, Version};
use crate::utils::{BitSequence, ByteBuffer};

const PAD_BYTES: [u32; 2] = [0xEC, 0x11];

/// 4-bit mode indicator
pub fn append_mode_info(mode: Mode, bits: &mut BitSequence) -> Result<()> {
    bits.append_bits(mode.bits() as u32, 4)
}

/// ECI designator: ECI mode indicator followed by the 8-bit assignment number
pub fn append_eci(eci: CharacterSetEci, bits: &mut BitSequence) -> Result<()> {
    bits.append_bits(Mode::Eci.bits() as u32, 4)?;
    bits.append_bits(eci.value(), 8)
}

/// Character count field sized for `mode` in `version`
pub fn append_length_info(
    num_letters: usize,
    version: &Version,
    mode: Mode,
    bits: &mut BitSequence,
) -> Result<()> {
    let num_bits = mode.character_count_bits(version)?;
    if num_letters >= (1usize << num_bits) {
        return Err(QrError::CapacityExceeded(format!(
            "{} is bigger than {}",
            num_letters,
            (1usize << num_bits) - 1
        )));
    }
    bits.append_bits(num_letters as u32, num_bits)
}

/// Terminate and pad `bits` to exactly `num_data_bytes` bytes
/// (ISO 18004:2006 8.4.8 and 8.4.9).
pub fn terminate_bits(num_data_bytes: usize, bits: &mut BitSequence) -> Result<()> {
    let capacity = num_data_bytes * 8;
    if bits.size() > capacity {
        return Err(QrError::CapacityExceeded(format!(
            "data bits cannot fit in the QR Code: {} > {}",
            bits.size(),
            capacity
        )));
    }
    // Terminator: up to four zero bits
    for _ in 0..4 {
        if bits.size() >= capacity {
            break;
        }
        bits.append_bit(false);
    }
    let num_bits_in_last_byte = bits.size() & 0x07;
    if num_bits_in_last_byte > 0 {
        for _ in num_bits_in_last_byte..8 {
            bits.append_bit(false);
        }
    }
    let num_padding_bytes = num_data_bytes - bits.size_in_bytes();
    for i in 0..num_padding_bytes {
        bits.append_bits(PAD_BYTES[i & 1], 8)?;
    }
    if bits.size() != capacity {
        return Err(QrError::Internal(format!(
            "bits size {} does not equal capacity {}",
            bits.size(),
            capacity
        )));
    }
    Ok(())
}

/// Data and EC byte counts of RS block `block_id`. Blocks in the second group
/// carry one extra data byte.
pub fn data_and_ec_bytes_for_block(
    num_total_bytes: usize,
    num_data_bytes: usize,
    num_rs_blocks: usize,
    block_id: usize,
) -> Result<(usize, usize)> {
    if block_id >= num_rs_blocks {
        return Err(QrError::InvalidArgument(format!(
            "block ID {} too large for {} blocks",
            block_id, num_rs_blocks
        )));
    }
    let num_rs_blocks_in_group2 = num_total_bytes % num_rs_blocks;
    let num_rs_blocks_in_group1 = num_rs_blocks - num_rs_blocks_in_group2;
    let num_total_bytes_in_group1 = num_total_bytes / num_rs_blocks;
    let num_total_bytes_in_group2 = num_total_bytes_in_group1 + 1;
    let num_data_bytes_in_group1 = num_data_bytes / num_rs_blocks;
    let num_data_bytes_in_group2 = num_data_bytes_in_group1 + 1;
    let num_ec_bytes_in_group1 = num_total_bytes_in_group1
        .checked_sub(num_data_bytes_in_group1)
        .ok_or_else(|| QrError::Internal("more data bytes than total bytes".to_string()))?;
    let num_ec_bytes_in_group2 = num_total_bytes_in_group2 - num_data_bytes_in_group2;

    if num_ec_bytes_in_group1 != num_ec_bytes_in_group2 {
        return Err(QrError::Internal(format!(
            "EC bytes mismatch: {} vs {}",
            num_ec_bytes_in_group1, num_ec_bytes_in_group2
        )));
    }
    if num_rs_blocks != num_rs_blocks_in_group1 + num_rs_blocks_in_group2 {
        return Err(QrError::Internal("RS blocks mismatch".to_string()));
    }
    let rebuilt = (num_data_bytes_in_group1 + num_ec_bytes_in_group1) * num_rs_blocks_in_group1
        + (num_data_bytes_in_group2 + num_ec_bytes_in_group2) * num_rs_blocks_in_group2;
    if num_total_bytes != rebuilt {
        return Err(QrError::Internal(format!(
            "total bytes mismatch: {} vs {}",
            num_total_bytes, rebuilt
        )));
    }

    if block_id < num_rs_blocks_in_group1 {
        Ok((num_data_bytes_in_group1, num_ec_bytes_in_group1))
    } else {
        Ok((num_data_bytes_in_group2, num_ec_bytes_in_group2))
    }
}

/// EC codewords for one block of data codewords
pub fn generate_ec_bytes(data_bytes: &[u8], num_ec_bytes: usize) -> Result<ByteBuffer> {
    let mut to_encode = Vec::with_capacity(data_bytes.len() + num_ec_bytes);
    to_encode.extend_from_slice(data_bytes);
    to_encode.resize(data_bytes.len() + num_ec_bytes, 0);
    ReedSolomonEncoder::shared().encode(&mut to_encode, num_ec_bytes)?;

    let mut ec_bytes = ByteBuffer::with_len(num_ec_bytes);
    ec_bytes.copy_from(&to_encode, data_bytes.len(), num_ec_bytes)?;
    Ok(ec_bytes)
}

struct BlockPair {
    data_bytes: ByteBuffer,
    ec_bytes: ByteBuffer,
}

/// Split `bits` into RS blocks, append EC codewords, and interleave
/// (ISO 18004:2006 8.6). All data bytes come first, column by column across
/// blocks, then all EC bytes the same way.
pub fn interleave_with_ec_bytes(
    bits: &BitSequence,
    num_total_bytes: usize,
    num_data_bytes: usize,
    num_rs_blocks: usize,
) -> Result<BitSequence> {
    if bits.size_in_bytes() != num_data_bytes {
        return Err(QrError::Internal(format!(
            "number of bits and data bytes does not match: {} vs {}",
            bits.size_in_bytes(),
            num_data_bytes
        )));
    }

    let mut data_bytes_offset = 0;
    let mut max_num_data_bytes = 0;
    let mut max_num_ec_bytes = 0;
    let mut blocks = Vec::with_capacity(num_rs_blocks);

    for block_id in 0..num_rs_blocks {
        let (size, num_ec_bytes) =
            data_and_ec_bytes_for_block(num_total_bytes, num_data_bytes, num_rs_blocks, block_id)?;
        let mut data_bytes = ByteBuffer::with_len(size);
        bits.to_bytes(8 * data_bytes_offset, data_bytes.as_mut_slice(), 0, size)?;
        let ec_bytes = generate_ec_bytes(data_bytes.as_slice(), num_ec_bytes)?;

        max_num_data_bytes = max_num_data_bytes.max(size);
        max_num_ec_bytes = max_num_ec_bytes.max(ec_bytes.len());
        data_bytes_offset += size;
        blocks.push(BlockPair { data_bytes, ec_bytes });
    }
    if num_data_bytes != data_bytes_offset {
        return Err(QrError::Internal(format!(
            "data bytes {} do not match offset {}",
            num_data_bytes, data_bytes_offset
        )));
    }

    let mut result = BitSequence::new();
    for i in 0..max_num_data_bytes {
        for block in &blocks {
            if i < block.data_bytes.len() {
                result.append_bits(block.data_bytes.at(i)? as u32, 8)?;
            }
        }
    }
    for i in 0..max_num_ec_bytes {
        for block in &blocks {
            if i < block.ec_bytes.len() {
                result.append_bits(block.ec_bytes.at(i)? as u32, 8)?;
            }
        }
    }
    if num_total_bytes != result.size_in_bytes() {
        return Err(QrError::Internal(format!(
            "interleaving error: {} and {} differ",
            num_total_bytes,
            result.size_in_bytes()
        )));
    }
    Ok(result)
}

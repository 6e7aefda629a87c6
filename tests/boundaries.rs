//! Boundary sizes where a super-block, sub-block, or word-width hierarchy
//! rolls over.

use succinct_core::bit_vec::BitVectorBuilder;
use test_case::test_case;

#[test_case(1)]
#[test_case(63)]
#[test_case(64)]
#[test_case(65)]
#[test_case(511)]
#[test_case(512)]
#[test_case(513)]
#[test_case(4095)]
#[test_case(4096)]
fn boundary_size_rank_and_select_u64(n: usize) {
    let bits: Vec<bool> = (0..n).map(|i| i % 7 == 0).collect();
    let mut b = BitVectorBuilder::<u64>::new();
    for &bit in &bits {
        b.push(bit);
    }
    let bv = b.build(true, true);

    let ones = bits.iter().filter(|&&b| b).count();
    assert_eq!(bv.num_ones(), ones);
    assert_eq!(bv.rank1(n).unwrap(), ones);
    for i in 0..ones {
        let pos = bv.select1(i).unwrap();
        assert!(bits[pos]);
        assert_eq!(bv.rank1(pos).unwrap(), i);
    }
    for i in 0..(n - ones) {
        let pos = bv.select0(i).unwrap();
        assert!(!bits[pos]);
        assert_eq!(bv.rank0(pos).unwrap(), i);
    }
}

#[test_case(1)]
#[test_case(63)]
#[test_case(64)]
#[test_case(65)]
#[test_case(511)]
#[test_case(512)]
#[test_case(513)]
#[test_case(4095)]
#[test_case(4096)]
fn boundary_size_rank_and_select_u32(n: usize) {
    let bits: Vec<bool> = (0..n).map(|i| i % 5 == 0).collect();
    let mut b = BitVectorBuilder::<u32>::new();
    for &bit in &bits {
        b.push(bit);
    }
    let bv = b.build(true, true);

    let ones = bits.iter().filter(|&&b| b).count();
    assert_eq!(bv.rank1(n).unwrap(), ones);
    for i in 0..ones {
        let pos = bv.select1(i).unwrap();
        assert!(bits[pos]);
    }
}

#[test]
fn empty_bit_vector_has_zero_rank_and_no_select() {
    let bv = BitVectorBuilder::<u64>::new().build(true, true);
    assert_eq!(bv.rank1(0).unwrap(), 0);
    assert!(bv.select1(0).is_err());
    assert!(bv.select0(0).is_err());
}

#[test]
fn all_zero_bit_vector_of_size_n() {
    let n = 777;
    let bv = BitVectorBuilder::<u64>::with_len(n).build(true, true);
    assert_eq!(bv.num_ones(), 0);
    assert_eq!(bv.rank1(n).unwrap(), 0);
    for i in 0..n {
        assert_eq!(bv.select0(i).unwrap(), i);
    }
}

#[test]
fn all_one_bit_vector_of_size_n() {
    let n = 777;
    let mut b = BitVectorBuilder::<u64>::with_len(n);
    for i in 0..n {
        b.set(i, true);
    }
    let bv = b.build(true, true);
    for i in 0..n {
        assert_eq!(bv.rank1(i).unwrap(), i);
        assert_eq!(bv.select1(i).unwrap(), i);
    }
}

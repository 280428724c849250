use quiggle::{BitBoard, BitBoardError};

#[test]
fn test_try_new_sizes() {
    // Success for board that fits
    let ok = BitBoard::<u128, 10>::try_new();
    assert!(ok.is_ok());

    // Failure when board is too large
    let err = BitBoard::<u8, 3>::try_new();
    assert!(matches!(err, Err(BitBoardError::SizeTooLarge { .. })));
}

#[test]
fn test_get_set() {
    let mut bb = BitBoard::<u16, 4>::new();
    assert!(bb.is_empty());

    bb.set(1, 1).unwrap();
    assert!(bb.get(1, 1).unwrap());
    assert!(!bb.get(1, 2).unwrap());

    bb.set(2, 3).unwrap();
    assert_eq!(bb.count_ones(), 2);
    assert!(matches!(
        bb.set(4, 0),
        Err(BitBoardError::IndexOutOfBounds { row: 4, col: 0 })
    ));
}

#[test]
fn test_from_cells_and_cells() {
    let bb = BitBoard::<u16, 4>::from_cells([(3, 3), (0, 1)]).unwrap();
    let bits: Vec<_> = bb.cells().collect();
    assert_eq!(bits, vec![(0, 1), (3, 3)]);
    assert!(BitBoard::<u16, 4>::from_cells([(0, 4)]).is_err());
}

#[test]
fn test_overlap_ops() {
    let a = BitBoard::<u128, 10>::from_cells([(0, 0), (0, 1), (0, 2)]).unwrap();
    let b = BitBoard::<u128, 10>::from_cells([(0, 2), (1, 2)]).unwrap();
    let both: Vec<_> = (a & b).cells().collect();
    assert_eq!(both, vec![(0, 2)]);

    let mut all = a | b;
    assert_eq!(all.count_ones(), 4);
    all |= BitBoard::from_cells([(9, 9)]).unwrap();
    assert!(all.get(9, 9).unwrap());
    assert!((a & BitBoard::from_cells([(5, 5)]).unwrap()).is_empty());
}

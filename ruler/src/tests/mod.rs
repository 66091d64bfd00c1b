mod test_settlement;
